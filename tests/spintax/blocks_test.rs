//! Visual segmentation.

use spinwheel::spintax::{segment, Block};

fn concat(blocks: &[Block]) -> String {
    blocks.iter().map(Block::raw_text).collect()
}

#[test]
fn empty_template_has_no_blocks() {
    assert!(segment("").is_empty());
}

#[test]
fn plain_text_is_one_static_block() {
    assert_eq!(
        segment("hello there"),
        vec![Block::Static {
            text: "hello there".to_owned()
        }]
    );
}

#[test]
fn groups_and_text_alternate() {
    let blocks = segment("Hi {Anna|Bob}, {bye/see you}");
    assert_eq!(
        blocks,
        vec![
            Block::Static {
                text: "Hi ".to_owned()
            },
            Block::Group {
                raw_text: "{Anna|Bob}".to_owned(),
                alternatives: vec!["Anna".to_owned(), "Bob".to_owned()],
                count: 2,
            },
            Block::Static {
                text: ", ".to_owned()
            },
            Block::Group {
                raw_text: "{bye/see you}".to_owned(),
                alternatives: vec!["bye".to_owned(), "see you".to_owned()],
                count: 2,
            },
        ]
    );
}

#[test]
fn nested_groups_stay_inside_alternatives_but_count_fully() {
    let blocks = segment("{A|{B|C}}");
    assert_eq!(
        blocks,
        vec![Block::Group {
            raw_text: "{A|{B|C}}".to_owned(),
            alternatives: vec!["A".to_owned(), "{B|C}".to_owned()],
            count: 3,
        }]
    );
}

#[test]
fn unmatched_brace_renders_as_static_text() {
    let blocks = segment("oops {A|B");
    assert_eq!(blocks.len(), 1);
    assert!(!blocks[0].is_group());
    assert_eq!(blocks[0].raw_text(), "oops {A|B");
}

#[test]
fn unmatched_brace_before_group_keeps_the_group() {
    let blocks = segment("{x {A|B}");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].raw_text(), "{x ");
    assert!(blocks[1].is_group());
}

#[test]
fn alternatives_are_not_trimmed() {
    let blocks = segment("{ a | b }");
    let Some(Block::Group { alternatives, .. }) = blocks.first() else {
        panic!("expected a group block, got {blocks:?}");
    };
    assert_eq!(alternatives, &vec![" a ".to_owned(), " b ".to_owned()]);
}

#[test]
fn blocks_reproduce_input() {
    let inputs = [
        "",
        "plain",
        "{A|B}{C|D}",
        "Hi {A|{B|C}} there } stray {",
        "{{{",
        "}}}{a}",
        "emoji 👋 {hé|wø} 日本",
    ];
    for input in inputs {
        assert_eq!(concat(&segment(input)), input, "{input}");
    }
}

#[test]
fn blocks_serialize_with_kind_tag() {
    let json = serde_json::to_value(segment("a{b|c}")).expect("serialize");
    assert_eq!(json[0]["kind"], "static");
    assert_eq!(json[1]["kind"], "group");
    assert_eq!(json[1]["count"], 2);
}
