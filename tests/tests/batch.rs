use copier::Projection;
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap, HashSet};
use tests::fixtures::{User, UserDto};

fn users() -> Vec<User> {
    ["ada", "grace", "linus"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| User {
            name: name.to_string(),
            age: 30 + i as u32,
            email: None,
        })
        .collect()
}

#[test]
fn lists() {
    let users = users();
    let dtos = UserDto::forward_list(Some(users.as_slice())).unwrap();

    let names: Vec<_> = dtos.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["ada", "grace", "linus"]);
    assert_eq!(UserDto::reverse_list(Some(dtos.as_slice())), Some(users));

    assert_eq!(UserDto::forward_list(None), None);
}

#[test]
fn sets_maps_and_arrays() {
    let users = users();

    let set: HashSet<User> = users.iter().cloned().collect();
    let dtos = UserDto::forward_set(Some(&set)).unwrap();
    assert_eq!(dtos.len(), 3);
    assert_eq!(UserDto::reverse_set(Some(&dtos)), Some(set));

    let map: HashMap<u32, User> = users.iter().map(|u| (u.age, u.clone())).collect();
    let dtos = UserDto::forward_map(Some(&map)).unwrap();
    assert_eq!(dtos[&31].name, "grace");
    assert_eq!(UserDto::reverse_map(Some(&dtos)), Some(map));

    let array = [users[0].clone(), users[2].clone()];
    let dtos = UserDto::forward_array(Some(&array)).unwrap();
    assert_eq!(dtos[1].name, "linus");

    let ordered: BTreeMap<_, _> = dtos.iter().map(|d| (d.age, d.name.clone())).collect();
    assert_eq!(ordered.keys().copied().collect::<Vec<_>>(), [30, 32]);
}

#[test]
fn customized_lists() {
    let users = users();
    let dtos = UserDto::forward_list_with(Some(users.as_slice()), |source, dto| {
        dto.email = Some(format!("{}@example.com", source.name));
    })
    .unwrap();

    assert_eq!(dtos[0].email.as_deref(), Some("ada@example.com"));

    let back = UserDto::reverse_list_with(Some(dtos.as_slice()), |_, user| user.email = None).unwrap();
    assert_eq!(back, users);
}

#[test]
fn optional_single_values() {
    let users = users();
    assert_eq!(
        UserDto::forward_opt(Some(&users[0])).map(|d| d.name),
        Some("ada".to_string())
    );
    assert_eq!(UserDto::reverse_opt(None), None);
}
