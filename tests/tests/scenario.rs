use copier::Projection;
use pretty_assertions::assert_eq;
use tests::assert_fresh;
use tests::fixtures::{Order, OrderDto, User, UserDto};

fn order() -> Order {
    Order {
        id: 42,
        tags: vec!["a".to_string(), "b".to_string()],
        owner: User {
            name: "Ada".to_string(),
            age: 36,
            email: Some("ada@example.com".to_string()),
        },
    }
}

#[test]
fn forward_copies_every_level() {
    let order = order();
    let dto = OrderDto::forward(&order);

    assert_eq!(dto.id, 42);
    assert_fresh!(dto.tags, order.tags);
    assert_eq!(
        dto.owner,
        UserDto {
            name: "Ada".to_string(),
            age: 36,
            email: Some("ada@example.com".to_string()),
        }
    );
    assert_ne!(dto.owner.name.as_ptr(), order.owner.name.as_ptr());
}

#[test]
fn reverse_restores_the_source() {
    let order = order();
    let back: Order = OrderDto::forward(&order).reverse();

    assert_eq!(back, order);
    assert_fresh!(back.tags, order.tags);
}

#[test]
fn round_trip_of_simple_fields() {
    let users = [
        User::default(),
        User {
            name: "Grace".to_string(),
            age: 85,
            email: None,
        },
    ];

    for user in users {
        assert_eq!(UserDto::forward(&user).reverse(), user);
    }
}
