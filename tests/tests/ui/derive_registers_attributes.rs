// `copier gen` reads these attributes from ordinary source files; the derive
// keeps them legal when the file is also compiled as-is.

#[derive(Default)]
struct User {
    id: i64,
}

#[derive(Default, copier::CopyTarget)]
#[copy_target(source = User, ignore(secret))]
struct UserDto {
    #[copy_field(source = id)]
    key: i64,
    secret: String,
}

fn main() {
    let user = User { id: 7 };
    let dto = UserDto { key: user.id, ..Default::default() };
    assert_eq!(dto.key, 7);
    assert!(dto.secret.is_empty());
}
