//! Records shared by the integration tests.

use copier::TypeConverter;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Formats cents as a decimal amount and parses it back.
#[derive(Debug, Default)]
pub struct Cents;

impl TypeConverter<i64, String> for Cents {
    fn convert(&self, source: &i64, format: &str) -> String {
        format!("{format}{}.{:02}", source / 100, source % 100)
    }
}

impl TypeConverter<String, i64> for Cents {
    fn convert(&self, source: &String, format: &str) -> i64 {
        let amount = source.trim_start_matches(format);
        let (units, cents) = amount.split_once('.').unwrap_or((amount, "0"));
        units.parse::<i64>().unwrap_or_default() * 100 + cents.parse::<i64>().unwrap_or_default()
    }
}

copier::projections! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
    pub struct User {
        pub name: String,
        pub age: u32,
        pub email: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
    #[copy_target(source = User)]
    pub struct UserDto {
        pub name: String,
        pub age: u32,
        pub email: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Order {
        pub id: i64,
        pub tags: Vec<String>,
        pub owner: User,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    #[copy_target(source = Order)]
    pub struct OrderDto {
        pub id: i64,
        pub tags: Vec<String>,
        pub owner: UserDto,
    }

    /// Containers of records at several depths.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Team {
        pub lead: Option<User>,
        pub members: Option<Vec<User>>,
        pub sections: Vec<HashMap<String, Option<User>>>,
        pub pair: [User; 2],
        pub alumni: Box<[User]>,
        pub queue: VecDeque<User>,
        pub labels: HashSet<String>,
        pub scores: Vec<i32>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    #[copy_target(source = Team)]
    pub struct TeamDto {
        pub lead: Option<UserDto>,
        pub members: Option<Vec<UserDto>>,
        pub sections: Vec<HashMap<String, Option<UserDto>>>,
        pub pair: [UserDto; 2],
        pub alumni: Box<[UserDto]>,
        pub queue: Vec<UserDto>,
        pub labels: BTreeSet<String>,
        pub scores: Vec<Option<i32>>,
    }

    /// Scalar fields against their nullable counterparts.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Reading {
        pub celsius: i32,
        pub humidity: Option<u8>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    #[copy_target(source = Reading)]
    pub struct ReadingDto {
        pub celsius: Option<i32>,
        pub humidity: u8,
    }

    #[derive(Debug, Default)]
    pub struct Labels;

    impl Labels {
        pub fn shout(&self, name: &str) -> String {
            name.to_uppercase()
        }

        pub fn years(&self, age: u32) -> String {
            format!("{age} years")
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Person {
        pub first: String,
        pub last: String,
        pub age: u32,
        pub balance: i64,
        pub password: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    #[copy_target(source = Person, ignore(password), uses(Labels))]
    pub struct PersonView {
        #[copy_field(source(first, last), expression = "format!(\"{} {}\", source.first, source.last)")]
        pub full_name: String,

        #[copy_field(source = first, qualified_by_name = "shout")]
        pub loud_first: String,

        #[copy_field(source = age, qualified_by_name = "Labels::years")]
        pub age_label: String,

        #[copy_field(expression = "source.age >= 18")]
        pub adult: bool,

        #[copy_field(converter = Cents, format = "$")]
        pub balance: String,

        #[copy_field(target = "last")]
        pub surname: String,

        pub password: String,
    }
}
