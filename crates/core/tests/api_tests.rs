//! Library API integration tests
use std::fs;
use std::path::PathBuf;

use chapbook_core::*;
use url::Url;

fn get_fixture_path(name: &str) -> PathBuf {
    fs::canonicalize(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn fixture_url(name: &str) -> Url {
    Url::from_file_path(get_fixture_path(name)).unwrap()
}

fn assembler(output_dir: &std::path::Path) -> Assembler<HttpSource> {
    let config = BookConfig::builder().output_dir(output_dir).build();
    let source = HttpSource::new(&config.fetch).unwrap();
    Assembler::new(source, config).unwrap()
}

#[tokio::test]
async fn test_fetch_index_from_fixture() {
    let tmp = tempfile::tempdir().unwrap();
    let book = assembler(tmp.path()).fetch_index(&fixture_url("book/index.html")).await.unwrap();

    assert_eq!(book.name, "剑来");
    assert_eq!(book.author, "烽火戏诸侯");

    let names: Vec<&str> = book.chapters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["第一章 惊蛰", "第二章 开门 【上】", r"第三章 100\% 的把握"]);
    assert_eq!(book.chapters[1].url, fixture_url("book/2.html"));
}

#[tokio::test]
async fn test_assemble_book_from_fixture() {
    let tmp = tempfile::tempdir().unwrap();
    let report = assembler(tmp.path())
        .assemble_book(&fixture_url("book/index.html"))
        .await
        .unwrap();

    assert_eq!(report.master_path, tmp.path().join("剑来.tex"));
    assert_eq!(report.chapters, 3);
    assert_eq!(report.degraded, vec![3]);

    let master = fs::read_to_string(&report.master_path).unwrap();
    let inputs: Vec<&str> = master.lines().filter(|l| l.starts_with("\\input{chapters/")).collect();
    assert_eq!(
        inputs,
        vec!["\\input{chapters/1.tex}", "\\input{chapters/2.tex}", "\\input{chapters/3.tex}"]
    );
    assert!(master.contains("\\title{剑来}\n\\author{烽火戏诸侯}\n"));
    assert!(master.ends_with("\\end{document}\n"));

    let chapters = tmp.path().join("chapters");
    assert_eq!(
        fs::read_to_string(chapters.join("1.tex")).unwrap(),
        "\\chapter{第一章 惊蛰}\n\
         二月二龙抬头。\\\\\n\
         暮色里小镇名叫泥瓶巷的僻静地方有位孤苦伶仃的清瘦少年。\\\\\n\
         价格涨了 50\\% \\& 还在涨 【注】\\\\\n"
    );
    assert_eq!(
        fs::read_to_string(chapters.join("2.tex")).unwrap(),
        "\\chapter{第二章 开门 【上】}\n\
         少年姓陈名平安。\\\\\n\
         路径 C:\\textbackslash temp\\textbackslash file\\_1 与 \\$HOME \\# 注释\\\\\n"
    );
    assert_eq!(
        fs::read_to_string(chapters.join("3.tex")).unwrap(),
        "\\chapter{第三章 100\\% 的把握}\n"
    );
}

#[tokio::test]
async fn test_font_settings_from_fixture_template() {
    let tmp = tempfile::tempdir().unwrap();
    let template_dir = tmp.path().join("template");
    fs::create_dir_all(&template_dir).unwrap();
    fs::copy(
        get_fixture_path("fontssetting_template.tex"),
        template_dir.join("fontssetting_template.tex"),
    )
    .unwrap();

    assembler(tmp.path())
        .assemble_book(&fixture_url("book/index.html"))
        .await
        .unwrap();

    let settings = fs::read_to_string(template_dir.join("fontssetting.tex")).unwrap();
    assert!(settings.contains("\\setCJKmainfont{PingFang SC}"));
    assert!(settings.contains("\\setmainfont{Times New Roman}"));
    assert!(settings.contains("\\setsansfont{Helvetica}"));
}

#[tokio::test]
async fn test_missing_author_aborts_run() {
    let tmp = tempfile::tempdir().unwrap();
    let result = assembler(tmp.path()).assemble_book(&fixture_url("no_author.html")).await;

    assert!(matches!(result, Err(ChapbookError::IndexParse(_))));
    assert!(!tmp.path().join("chapters").exists());
}

#[tokio::test]
async fn test_unreachable_index_aborts_run() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = Url::from_file_path(tmp.path().join("missing.html")).unwrap();
    let result = assembler(tmp.path()).assemble_book(&missing).await;

    assert!(matches!(result, Err(ChapbookError::IndexFetch { .. })));
}

#[test]
fn test_sanitizer_api() {
    let sanitizer = Sanitizer::default();
    let out = sanitizer.sanitize("Cost: 50% & rising [now]");

    assert!(out.contains(r"50\%"));
    assert!(out.contains(r"\&"));
    assert!(out.contains('【') && out.contains('】'));
    assert!(!out.contains('[') && !out.contains(']'));
}
