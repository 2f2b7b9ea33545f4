use copier::Projection;
use pretty_assertions::assert_eq;
use tests::fixtures::{Reading, ReadingDto};

#[test]
fn scalars_are_boxed_forward() {
    let dto = ReadingDto::forward(&Reading {
        celsius: -4,
        humidity: Some(80),
    });

    assert_eq!(
        dto,
        ReadingDto {
            celsius: Some(-4),
            humidity: 80,
        }
    );
}

#[test]
fn absent_values_unbox_to_zero() {
    let dto = ReadingDto::forward(&Reading {
        celsius: 12,
        humidity: None,
    });
    assert_eq!(dto.humidity, 0);

    let reading = ReadingDto {
        celsius: None,
        humidity: 5,
    }
    .reverse();

    assert_eq!(
        reading,
        Reading {
            celsius: 0,
            humidity: Some(5),
        }
    );
}
