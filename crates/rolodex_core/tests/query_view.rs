use rolodex_core::query::view::{filter_users, sort_users};
use rolodex_core::{NewUser, SortField, SortOrder, UserRecord};

#[test]
fn empty_term_keeps_every_record_in_order() {
    let users = fixture();

    let visible = filter_users(&users, "");

    assert_eq!(visible.len(), users.len());
    assert!(std::ptr::eq(visible[0], &users[0]));
    assert!(std::ptr::eq(visible[3], &users[3]));
}

#[test]
fn term_matches_name_and_email_case_insensitively() {
    let users = fixture();

    let by_name = filter_users(&users, "OMAR");
    assert_eq!(names(&by_name), ["Omar Haddad"]);

    let by_email = filter_users(&users, "melissa");
    assert_eq!(names(&by_email), ["Ervin Howell"]);

    let substring = filter_users(&users, "ann");
    assert_eq!(names(&substring), ["Leanne Graham", "Ervin Howell"]);
}

#[test]
fn unmatched_term_yields_an_empty_view() {
    let users = fixture();
    assert!(filter_users(&users, "zzz-no-such-user").is_empty());
}

#[test]
fn no_sort_field_keeps_the_filtered_order() {
    let users = fixture();

    let visible = sort_users(filter_users(&users, ""), None, SortOrder::Desc);

    assert_eq!(names(&visible), ["Omar Haddad", "Leanne Graham", "Ervin Howell", "alice quinn"]);
}

#[test]
fn name_sort_ignores_case() {
    let users = fixture();

    let ascending = sort_users(filter_users(&users, ""), Some(SortField::Name), SortOrder::Asc);

    // Byte order would put "alice quinn" after the capitalized names.
    assert_eq!(
        names(&ascending),
        ["alice quinn", "Ervin Howell", "Leanne Graham", "Omar Haddad"]
    );
}

#[test]
fn descending_is_the_exact_reverse_of_ascending() {
    let users = fixture();

    let ascending = sort_users(filter_users(&users, ""), Some(SortField::Email), SortOrder::Asc);
    let descending = sort_users(filter_users(&users, ""), Some(SortField::Email), SortOrder::Desc);

    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(names(&descending), names(&reversed));
}

#[test]
fn equal_keys_keep_their_incoming_order() {
    let users = vec![
        local_user(102, "Sam Pike", "b@twin.example"),
        local_user(101, "Sam Pike", "a@twin.example"),
    ];

    let ascending = sort_users(filter_users(&users, ""), Some(SortField::Name), SortOrder::Asc);
    assert_eq!(ascending[0].id, 102);
    assert_eq!(ascending[1].id, 101);

    let descending = sort_users(filter_users(&users, ""), Some(SortField::Name), SortOrder::Desc);
    assert_eq!(descending[0].id, 102);
    assert_eq!(descending[1].id, 101);
}

#[test]
fn sorting_is_idempotent() {
    let users = fixture();

    let once = sort_users(filter_users(&users, ""), Some(SortField::Name), SortOrder::Asc);
    let twice = sort_users(once.clone(), Some(SortField::Name), SortOrder::Asc);

    assert_eq!(names(&once), names(&twice));
}

#[test]
fn sort_field_parse_accepts_loose_input() {
    assert_eq!(SortField::parse("name"), Some(SortField::Name));
    assert_eq!(SortField::parse(" EMAIL "), Some(SortField::Email));
    assert_eq!(SortField::parse("phone"), None);
}

fn names<'a>(users: &[&'a UserRecord]) -> Vec<&'a str> {
    users.iter().map(|user| user.name.as_str()).collect()
}

fn fixture() -> Vec<UserRecord> {
    vec![
        local_user(1_700_000_000_001, "Omar Haddad", "omar@example.com"),
        local_user(1, "Leanne Graham", "Sincere@april.biz"),
        local_user(2, "Ervin Howell", "Shanna@melissa.tv"),
        local_user(3, "alice quinn", "alice@example.com"),
    ]
}

fn local_user(id: i64, name: &str, email: &str) -> UserRecord {
    UserRecord::new_local(
        id,
        &NewUser {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
        },
    )
}
