use anki_tts::domain::enrichment::spoken_text_for;
use anki_tts::render_html;
use pretty_assertions::assert_eq;

#[test]
fn it_should_render_card_fronts_from_real_decks() {
    let cases = [
        ("<div>Hello world</div>", "Hello world"),
        ("First line<br>Second line", "First line"),
        ("<p>First paragraph</p><p>Second paragraph</p>", "First paragraph"),
        ("<div>Common phrase.idiom</div>", "Common phrase"),
        ("Hello /həˈloʊ/ world", "Hello world"),
        ("<div>Hello world!</div>", "Hello world!"),
        (
            "He lost control of his car when a front/rear wheel /wiːl/ hit a rock as he approached the first bend /bend/",
            "He lost control of his car when a front/rear wheel hit a rock as he approached the first bend",
        ),
        (
            "<p>He kicked powerfully through the pool using his <strong>training fins</strong> /ˈtreɪnɪŋ fɪnz/.<br></p><p><em>noun, sports</em></p>",
            "He kicked powerfully through the pool using his training fins.",
        ),
    ];

    for (html, expected) in cases {
        assert_eq!(render_html(html), expected, "input: {html}");
    }
}

#[test]
fn it_should_ignore_existing_sound_tags() {
    assert_eq!(
        spoken_text_for("<div>Break the ice.idiom</div><br><br>[sound:old.mp3]"),
        "Break the ice"
    );
}

#[test]
fn it_should_return_empty_text_for_markup_only_fronts() {
    assert_eq!(render_html("<div><br></div>"), "");
    assert_eq!(render_html("<style>b { color: red }</style>"), "");
}
