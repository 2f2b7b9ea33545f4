use copier::Projection;
use pretty_assertions::assert_eq;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tests::fixtures::{Team, TeamDto, User, UserDto};

fn user(name: &str) -> User {
    User {
        name: name.to_string(),
        age: 30,
        email: None,
    }
}

fn dto(name: &str) -> UserDto {
    UserDto::forward(&user(name))
}

#[test]
fn absent_containers_stay_absent() {
    let team = Team::default();
    let out = TeamDto::forward(&team);

    assert_eq!(out.lead, None);
    assert_eq!(out.members, None);
    assert!(out.sections.is_empty());
}

#[test]
fn empty_containers_are_new_allocations() {
    let team = Team {
        members: Some(Vec::with_capacity(8)),
        ..Team::default()
    };
    let out = TeamDto::forward(&team);

    let members = out.members.unwrap();
    assert!(members.is_empty());
    assert_ne!(
        members.as_ptr() as usize,
        team.members.as_ref().unwrap().as_ptr() as usize
    );
}

#[test]
fn nested_maps_of_records() {
    let mut first = HashMap::new();
    first.insert("lead".to_string(), Some(user("ada")));
    first.insert("vacant".to_string(), None);

    let mut second = HashMap::new();
    second.insert("lead".to_string(), Some(user("grace")));

    let team = Team {
        sections: vec![first, second],
        ..Team::default()
    };
    let out = TeamDto::forward(&team);

    assert_eq!(out.sections.len(), 2);
    assert_eq!(out.sections[0]["lead"], Some(dto("ada")));
    assert_eq!(out.sections[0]["vacant"], None);
    assert_eq!(out.sections[1]["lead"], Some(dto("grace")));

    // each value is rebuilt rather than shared
    let source = team.sections[0]["lead"].as_ref().unwrap();
    let copied = out.sections[0]["lead"].as_ref().unwrap();
    assert_ne!(source.name.as_ptr(), copied.name.as_ptr());

    assert_eq!(out.reverse().sections, team.sections);
}

#[test]
fn optional_sequences_and_records() {
    let team = Team {
        lead: Some(user("ada")),
        members: Some(vec![user("grace"), user("linus")]),
        ..Team::default()
    };
    let out = TeamDto::forward(&team);

    assert_eq!(out.lead, Some(dto("ada")));
    assert_eq!(out.members, Some(vec![dto("grace"), dto("linus")]));
    assert_eq!(out.reverse(), team);
}

#[test]
fn arrays_and_boxed_slices() {
    let team = Team {
        pair: [user("a"), user("b")],
        alumni: vec![user("c")].into_boxed_slice(),
        ..Team::default()
    };
    let out = TeamDto::forward(&team);

    assert_eq!(out.pair, [dto("a"), dto("b")]);
    assert_eq!(&out.alumni[..], &[dto("c")]);
    assert_eq!(out.reverse(), team);
}

#[test]
fn sequences_and_sets_change_kind() {
    let team = Team {
        queue: VecDeque::from([user("first"), user("second")]),
        labels: HashSet::from(["b".to_string(), "a".to_string()]),
        ..Team::default()
    };
    let out = TeamDto::forward(&team);

    assert_eq!(out.queue, vec![dto("first"), dto("second")]);
    assert_eq!(
        out.labels,
        BTreeSet::from(["a".to_string(), "b".to_string()])
    );
    assert_eq!(out.reverse(), team);
}

#[test]
fn scalar_elements_gain_and_lose_nullability() {
    let team = Team {
        scores: vec![3, -1],
        ..Team::default()
    };
    let out = TeamDto::forward(&team);
    assert_eq!(out.scores, vec![Some(3), Some(-1)]);

    let dto = TeamDto {
        scores: vec![Some(7), None],
        ..out
    };
    assert_eq!(dto.reverse().scores, vec![7, 0]);
}
