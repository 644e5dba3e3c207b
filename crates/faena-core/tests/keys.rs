use faena_core::keys;

#[test]
fn child_key_round_trips_to_parent() {
    let key = keys::child_answer("42");
    assert_eq!(key, "42_child");
    assert_eq!(keys::parent_of_child(&key), Some("42"));
    assert_eq!(keys::parent_of_child("42"), None);
}

#[test]
fn picture_keys_are_url_safe() {
    let key = keys::picture_object(7, "fotos", "abc", "andamio norte (1).jpg");
    assert_eq!(key, "pictures/7/fotos/abc-andamio_norte__1_.jpg");
}

#[test]
fn empty_file_name_gets_placeholder() {
    assert_eq!(keys::sanitize_file_name(""), "picture");
}
