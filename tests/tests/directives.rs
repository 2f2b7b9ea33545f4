use copier::Projection;
use pretty_assertions::assert_eq;
use tests::fixtures::{Person, PersonView};

fn person() -> Person {
    Person {
        first: "Ada".to_string(),
        last: "Lovelace".to_string(),
        age: 36,
        balance: 1250,
        password: "secret".to_string(),
    }
}

#[test]
fn every_strategy_forward() {
    let view = PersonView::forward(&person());

    assert_eq!(
        view,
        PersonView {
            full_name: "Ada Lovelace".to_string(),
            loud_first: "ADA".to_string(),
            age_label: "36 years".to_string(),
            adult: true,
            balance: "$12.50".to_string(),
            surname: "Lovelace".to_string(),
            // ignored
            password: String::new(),
        }
    );
}

#[test]
fn reverse_keeps_two_way_mappings_only() {
    let person = PersonView::forward(&person()).reverse();

    assert_eq!(
        person,
        Person {
            first: String::new(),
            last: "Lovelace".to_string(),
            age: 0,
            balance: 1250,
            password: String::new(),
        }
    );
}

#[test]
fn customized_forward() {
    let view = PersonView::forward_with(&person(), |source, view| {
        view.password = "*".repeat(source.password.len());
    });

    assert_eq!(view.password, "******");
}
