use fastfountain::parser::fountain_parser::FountainParser;
use fastfountain::{ElementType, Script};

#[test]
fn test_title_page_entries_in_order() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Title: Big Fish\nCredit: written by\n\nFADE IN:");

    // 标题页条目保持源文本顺序
    assert_eq!(result.title_page.len(), 2, "应该解析出两个标题页条目");
    assert_eq!(result.title_page[0].key, "title");
    assert_eq!(result.title_page[0].values, vec!["Big Fish"]);
    assert_eq!(result.title_page[1].key, "credit");
    assert_eq!(result.title_page[1].values, vec!["written by"]);
}

#[test]
fn test_author_key_normalized_to_authors() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Author: Jane Doe\n\nSome action.");

    assert_eq!(result.title_page.len(), 1);
    assert_eq!(result.title_page[0].key, "authors", "author应该统一为authors");
    assert_eq!(result.title_page[0].values, vec!["Jane Doe"]);
}

#[test]
fn test_multiline_title_directive() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Title: Big Fish\nContact:\n    555-1234\n    big@fish.com\n\nFADE IN:");

    assert_eq!(result.title_page.len(), 2);
    assert_eq!(result.title_page[1].key, "contact");
    assert_eq!(result.title_page[1].values, vec!["555-1234", "big@fish.com"]);
}

#[test]
fn test_no_title_page_falls_through_to_body() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Just some action text.\nMore of it.");

    assert!(result.title_page.is_empty(), "没有指令的顶部块不算标题页");
    assert_eq!(result.elements.len(), 1);
    assert_eq!(result.elements[0].element_type, ElementType::Action);
    assert_eq!(result.elements[0].text, "Just some action text.\nMore of it.");
}

#[test]
fn test_single_false_directive_is_not_title_page() {
    let mut parser = FountainParser::new();
    let result = parser.parse("FADE IN:\n\nEXT. RIVER - DAY");

    // 单个没有值的 "Key:" 行不能误判为标题页
    assert!(result.title_page.is_empty());
    assert_eq!(result.elements[0].element_type, ElementType::Action);
    assert_eq!(result.elements[0].text, "FADE IN:");
    assert_eq!(result.elements[1].element_type, ElementType::SceneHeading);
}

#[test]
fn test_implicit_scene_heading() {
    let mut parser = FountainParser::new();
    let result = parser.parse("EXT. RIVER - DAY\n\nA boat floats by.");

    assert_eq!(result.elements[0].element_type, ElementType::SceneHeading);
    assert_eq!(result.elements[0].text, "EXT. RIVER - DAY");
    assert_eq!(result.elements[1].element_type, ElementType::Action);
}

#[test]
fn test_scene_heading_demoted_without_blank_line_after() {
    let mut parser = FountainParser::new();
    let result = parser.parse("INT. HOUSE - DAY\nJohn walks in.");

    // 场景标题必须被空行包围，否则降级为action并合并后续行
    assert_eq!(result.elements.len(), 1);
    assert_eq!(result.elements[0].element_type, ElementType::Action);
    assert_eq!(result.elements[0].text, "INT. HOUSE - DAY\nJohn walks in.");
}

#[test]
fn test_forced_scene_heading_with_scene_number() {
    let mut parser = FountainParser::new();
    let result = parser.parse(".HOUSE - DAY #110A#");

    assert_eq!(result.elements.len(), 1);
    assert_eq!(result.elements[0].element_type, ElementType::SceneHeading);
    // 编号前的尾部空格保留
    assert_eq!(result.elements[0].text, "HOUSE - DAY ");
    assert_eq!(result.elements[0].scene_number.as_deref(), Some("110A"));
}

#[test]
fn test_implicit_scene_heading_with_scene_number() {
    let mut parser = FountainParser::new();
    let result = parser.parse("INT. HOUSE - DAY #1#");

    assert_eq!(result.elements[0].element_type, ElementType::SceneHeading);
    assert_eq!(result.elements[0].text, "INT. HOUSE - DAY ");
    assert_eq!(result.elements[0].scene_number.as_deref(), Some("1"));
}

#[test]
fn test_ellipsis_is_not_forced_scene_heading() {
    let mut parser = FountainParser::new();
    let result = parser.parse("...and so it goes.");

    assert_eq!(result.elements[0].element_type, ElementType::Action);
}

#[test]
fn test_dialogue_lines_merge_into_one_element() {
    let mut parser = FountainParser::new();
    let result = parser.parse("JOHN\nHello there.\nHow are you?");

    assert_eq!(result.elements.len(), 2, "角色+两行对白应该只有两个元素");
    assert_eq!(result.elements[0].element_type, ElementType::Character);
    assert_eq!(result.elements[1].element_type, ElementType::Dialogue);
    assert_eq!(result.elements[1].text, "Hello there.\nHow are you?");
}

#[test]
fn test_parenthetical_inside_dialogue_block() {
    let mut parser = FountainParser::new();
    let result = parser.parse("JOHN\n(quietly)\nHello.");

    assert_eq!(result.elements[0].element_type, ElementType::Character);
    assert_eq!(result.elements[1].element_type, ElementType::Parenthetical);
    assert_eq!(result.elements[1].text, "(quietly)");
    assert_eq!(result.elements[2].element_type, ElementType::Dialogue);
}

#[test]
fn test_dual_dialogue_pairing() {
    let mut parser = FountainParser::new();
    let result = parser.parse("JOHN\nHello.\n\nJANE ^\nHi.");

    assert_eq!(result.elements.len(), 4);
    assert_eq!(result.elements[0].element_type, ElementType::Character);
    assert!(result.elements[0].is_dual_dialogue, "前一个角色应该被回溯标记为双对话");
    assert_eq!(result.elements[2].element_type, ElementType::Character);
    assert!(result.elements[2].is_dual_dialogue);
    assert_eq!(result.elements[2].text, "JANE", "第二个角色的^应该被去掉");
}

#[test]
fn test_character_cue_requires_following_content() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Some action.\n\nJOHN\n\nMore action.");

    // 后面紧跟空行的全大写行不是角色提示
    let types: Vec<ElementType> = result.elements.iter().map(|e| e.element_type).collect();
    assert_eq!(
        types,
        vec![ElementType::Action, ElementType::Action, ElementType::Action]
    );
}

#[test]
fn test_forced_character_and_dialogue() {
    let mut parser = FountainParser::new();
    let result = parser.parse("@McAvoy\nIt's a fine day.");

    assert_eq!(result.elements[0].element_type, ElementType::Character);
    assert_eq!(result.elements[1].element_type, ElementType::Dialogue);
}

#[test]
fn test_dialogue_internal_blank_marker() {
    // 对话内的双空格行并入对白而不是断块
    let mut parser = FountainParser::new();
    let result = parser.parse("JOHN\nFirst part.\n  \nSecond part.");

    assert_eq!(result.elements.len(), 2);
    assert_eq!(result.elements[1].element_type, ElementType::Dialogue);
    assert_eq!(result.elements[1].text, "First part.\n  \nSecond part.");
}

#[test]
fn test_whitespace_line_outside_dialogue_is_action() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Some action.\n\n    \n\nMore action.");

    let types: Vec<ElementType> = result.elements.iter().map(|e| e.element_type).collect();
    assert_eq!(
        types,
        vec![ElementType::Action, ElementType::Action, ElementType::Action]
    );
    assert_eq!(result.elements[1].text, "    ", "有意缩进的空白行保留原样");
}

#[test]
fn test_transitions() {
    let mut parser = FountainParser::new();
    let result = parser.parse("CUT TO:\n\nFADE OUT.\n\n> SMASH CUT");

    assert_eq!(result.elements[0].element_type, ElementType::Transition);
    assert_eq!(result.elements[1].element_type, ElementType::Transition);
    assert_eq!(result.elements[2].element_type, ElementType::Transition);
    assert_eq!(result.elements[2].text, "SMASH CUT", "强制转场去掉>并修剪空白");
}

#[test]
fn test_lowercase_to_line_is_not_transition() {
    let mut parser = FountainParser::new();
    let result = parser.parse("he walked over TO:");

    assert_eq!(result.elements[0].element_type, ElementType::Action);
}

#[test]
fn test_centered_action() {
    let mut parser = FountainParser::new();
    let result = parser.parse("> THE END <");

    assert_eq!(result.elements[0].element_type, ElementType::Action);
    assert!(result.elements[0].is_centered);
    assert_eq!(result.elements[0].text, "THE END");
}

#[test]
fn test_lyrics_continuation_and_separation() {
    let mut parser = FountainParser::new();
    let result = parser.parse("~la la la\n~more lyrics\n\n~new verse");

    // 连续歌词不插分隔，隔空行的歌词之间插一个空白歌词元素
    assert_eq!(result.elements.len(), 4);
    assert_eq!(result.elements[0].element_type, ElementType::Lyrics);
    assert_eq!(result.elements[1].element_type, ElementType::Lyrics);
    assert_eq!(result.elements[2].element_type, ElementType::Lyrics);
    assert_eq!(result.elements[2].text, " ");
    assert_eq!(result.elements[3].text, "~new verse");
}

#[test]
fn test_section_heading_depth() {
    let mut parser = FountainParser::new();
    let result = parser.parse("# Act One\n\n## Sequence A");

    assert_eq!(result.elements[0].element_type, ElementType::SectionHeading);
    assert_eq!(result.elements[0].section_depth, 1);
    assert_eq!(result.elements[0].text, "Act One");
    assert_eq!(result.elements[1].section_depth, 2);
    assert_eq!(result.elements[1].text, "Sequence A");
}

#[test]
fn test_empty_section_heading_dropped() {
    let mut parser = FountainParser::new();
    let result = parser.parse("#\n\nSome action.");

    // 去掉#后为空的章节标题不产出元素
    assert_eq!(result.elements.len(), 1);
    assert_eq!(result.elements[0].element_type, ElementType::Action);
}

#[test]
fn test_synopsis() {
    let mut parser = FountainParser::new();
    let result = parser.parse("= The hero meets the mentor.");

    assert_eq!(result.elements[0].element_type, ElementType::Synopsis);
    assert_eq!(result.elements[0].text, " The hero meets the mentor.");
}

#[test]
fn test_page_break() {
    let mut parser = FountainParser::new();
    let result = parser.parse("Before.\n\n===\n\nAfter.");

    assert_eq!(result.elements[1].element_type, ElementType::PageBreak);
}

#[test]
fn test_comment_element() {
    let mut parser = FountainParser::new();
    let result = parser.parse("[[ remember to fix this scene ]]");

    assert_eq!(result.elements[0].element_type, ElementType::Comment);
    assert_eq!(result.elements[0].text, "remember to fix this scene");
}

#[test]
fn test_single_line_boneyard() {
    let mut parser = FountainParser::new();
    let result = parser.parse("/* cut this */");

    assert_eq!(result.elements[0].element_type, ElementType::Boneyard);
    assert_eq!(result.elements[0].text.trim(), "cut this");
}

#[test]
fn test_multiline_boneyard() {
    let mut parser = FountainParser::new();
    let result = parser.parse("/*\nfirst draft\nsecond draft\n*/\n\nKept action.");

    assert_eq!(result.elements.len(), 2);
    assert_eq!(result.elements[0].element_type, ElementType::Boneyard);
    assert_eq!(result.elements[0].text, "first draft\nsecond draft");
    assert_eq!(result.elements[1].element_type, ElementType::Action);
}

#[test]
fn test_crlf_normalized() {
    let mut parser = FountainParser::new();
    let result = parser.parse("EXT. RIVER - DAY\r\n\r\nA boat.");

    assert_eq!(result.elements[0].element_type, ElementType::SceneHeading);
    assert_eq!(result.elements[1].element_type, ElementType::Action);
}

#[test]
fn test_arbitrary_input_never_fails() {
    // 任意输入都能走完解析，最坏情况全部变成action
    let mut parser = FountainParser::new();
    for script in [
        "",
        "\n\n\n",
        "..\n~\n>\n<\n=\n==\n#\n@\n!\n/*\n*/\n===",
        "莫名其妙的文本\n没有任何结构",
        "\u{0}\u{7f}\t\t",
    ] {
        let result = parser.parse(script);
        let _ = result.elements.len();
    }
}

#[test]
fn test_script_aggregate() {
    let script = Script::from_string("Title: Test\n\nINT. ROOM - DAY\n\nJOHN\nHello.");

    assert_eq!(script.title_page.len(), 1);
    assert_eq!(script.elements.len(), 3);
    assert!(script.filename.is_none());
}
