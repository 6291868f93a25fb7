use hymnal_core::db::converter::{decode, encode};
use hymnal_core::Hymn;

fn sample_hymns() -> Vec<Hymn> {
    let mut first = Hymn::new(
        1,
        "Praise to the Lord",
        "Praise to the Lord, the Almighty, the King of creation!\nO my soul, praise Him.",
    );
    first.author = Some("Joachim Neander".to_string());
    first.composer = Some("Stralsund Gesangbuch".to_string());
    first.tempo = Some("104-120".to_string());
    first.key = Some("F Major".to_string());
    first.favorite = true;

    let mut second = Hymn::new(2, "All Creatures of Our God and King", "Alleluia!");
    second.edited = Some("2017-07-02".to_string());

    vec![first, second, Hymn::new(3, "", "")]
}

#[test]
fn decode_of_encode_returns_same_hymns_in_order() {
    let hymns = sample_hymns();

    let decoded = decode(Some(&encode(&hymns).unwrap())).unwrap();

    assert_eq!(decoded, hymns);
}

#[test]
fn encoding_uses_asset_field_names() {
    let value: serde_json::Value = serde_json::from_str(&encode(&sample_hymns()).unwrap()).unwrap();

    assert_eq!(value[0]["number"], 1);
    assert_eq!(value[0]["lyrics"].as_str().unwrap().lines().count(), 2);
    assert_eq!(value[0]["key"], "F Major");
    assert_eq!(value[0]["favorite"], true);
    assert!(value[1].get("author").is_none());
    assert_eq!(value[1]["edited"], "2017-07-02");
}

#[test]
fn decode_accepts_minimal_asset_objects() {
    let json = serde_json::json!([
        { "number": 12, "title": "Joyful, Joyful", "lyrics": "Joyful, joyful, we adore Thee" },
        { "number": 13, "title": "New Songs", "lyrics": "...", "composer": null, "extra": 1 }
    ])
    .to_string();

    let hymns = decode(Some(&json)).unwrap();

    assert_eq!(hymns.len(), 2);
    assert_eq!(hymns[0].number, 12);
    assert_eq!(hymns[0].content, "Joyful, joyful, we adore Thee");
    assert!(!hymns[0].favorite);
    assert_eq!(hymns[1].composer, None);
}

#[test]
fn decode_rejects_wrong_shapes() {
    for malformed in [
        r#"[{"number":1,"title":"Praise to the Lord","lyr"#,
        r#"[{"title":"no number","lyrics":"..."}]"#,
        r#"[{"number":"one","title":"x","lyrics":"y"}]"#,
        r#"[null]"#,
        r#""just text""#,
        "not json",
    ] {
        assert!(decode(Some(malformed)).is_err(), "accepted `{malformed}`");
    }
}
