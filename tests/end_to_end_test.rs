use anyhow::Result;
use library_lookup::core::CopyCounting;
use library_lookup::{CliConfig, LocalStorage, LookupEngine, LookupPipeline};
use tempfile::TempDir;

const BOOKS: &str = r#"{
    "generated_at": "2024-05-20T09:15:00+00:00",
    "books": [
        {
            "title": "Piranesi",
            "author": "Clarke, Susanna, 1959-",
            "publication_year": "2020",
            "record_details": {"BRN": "1001", "ISBN": "9781526622426 pbk"},
            "availability": [
                {"location": "Harpenden Library", "collection": "Fiction", "status": "Available", "call_number": "General fiction pbk"},
                {"location": "Harpenden Library", "collection": "Fiction", "status": "Available", "call_number": "General fiction pbk"},
                {"location": "St Albans Library", "collection": "Fiction", "status": "Available", "call_number": ""}
            ]
        },
        {
            "title": "Jonathan Strange & Mr Norrell",
            "author": "Clarke, Susanna",
            "publication_year": "2004",
            "record_details": {"BRN": "1002"},
            "availability": [
                {"location": "Oxhey Community Library", "collection": "Fiction", "status": "Available", "call_number": ""},
                {"location": "Watford Central Library", "collection": "Fiction", "status": "Onloan - Due: 02 Jun 2024", "call_number": ""}
            ]
        },
        {
            "title": "The Ladies of Grace Adieu",
            "publication_year": "2006",
            "record_details": {"BRN": "1003"},
            "availability": []
        }
    ]
}"#;

fn config(input: &TempDir, output: &TempDir, branches: &[&str]) -> CliConfig {
    CliConfig {
        input_path: input.path().to_str().unwrap().to_string(),
        books_file: "books.json".to_string(),
        output_path: output.path().to_str().unwrap().to_string(),
        branches: branches.iter().map(|b| b.to_string()).collect(),
        copy_counting: CopyCounting::Exclusive,
        page_title: "Books to read".to_string(),
        render_json: true,
        verbose: false,
    }
}

async fn run(config: CliConfig) -> library_lookup::Result<String> {
    let source = LocalStorage::new(config.input_path.clone());
    let target = LocalStorage::new(config.output_path.clone());
    let pipeline = LookupPipeline::new(source, target, config);
    LookupEngine::new(pipeline).run().await
}

#[tokio::test]
async fn test_end_to_end_page_generation() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    std::fs::write(input.path().join("books.json"), BOOKS)?;

    let path = run(config(&input, &output, &["Harpenden Library"])).await?;
    assert!(path.ends_with("/index.html"));

    let page = std::fs::read_to_string(output.path().join("index.html"))?;

    // Piranesi has two copies nearby, so it comes first
    let piranesi = page.find("data-book-id=\"1001\"").unwrap();
    let jonathan = page.find("data-book-id=\"1002\"").unwrap();
    let ladies = page.find("data-book-id=\"1003\"").unwrap();
    assert!(piranesi < jonathan && jonathan < ladies);

    assert!(page.contains(
        "<p><strong>2 copies available nearby.</strong></p>\
         <ul><li>Harpenden Library / General fiction paperback (\u{d7}\u{2009}2)</li></ul>\
         <p class=\"extra_copies\">plus 1 more copy in St Albans.</p>"
    ));
    assert!(page.contains("<p>1 copy available in Oxhey Community Library.</p>"));
    assert!(page.contains("<p>No copies available.</p>"));
    assert!(page.contains("Jonathan Strange &amp; Mr Norrell"));
    assert!(page.contains("Susanna Clarke &middot; 2020 &middot; paperback"));

    let saved = std::fs::read_to_string(output.path().join("branchesSelected.json"))?;
    assert_eq!(saved, r#"["Harpenden Library"]"#);

    Ok(())
}

#[tokio::test]
async fn test_saved_selection_is_reused_on_next_run() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    std::fs::write(input.path().join("books.json"), BOOKS)?;

    run(config(&input, &output, &["Oxhey Community Library"])).await?;
    run(config(&input, &output, &[])).await?;

    let render: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.path().join("render.json"))?)?;

    assert_eq!(render["selection"], serde_json::json!(["Oxhey Community Library"]));
    assert_eq!(render["books"][0]["id"], "1002");
    assert_eq!(render["books"][0]["has_local_copies"], true);
    assert_eq!(
        render["selected_branch_label"],
        "(1 selected \u{2013} Oxhey Community Library)"
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_catalogue_is_reported() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;

    let err = run(config(&input, &output, &[])).await.unwrap_err();

    assert_eq!(
        err.severity(),
        library_lookup::utils::error::ErrorSeverity::Critical
    );
    assert!(!output.path().join("index.html").exists());

    Ok(())
}

#[tokio::test]
async fn test_book_without_identifier_aborts_the_run() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    std::fs::write(
        input.path().join("books.json"),
        r#"[{"title": "Nameless", "availability": []}]"#,
    )?;

    let err = run(config(&input, &output, &[])).await.unwrap_err();
    assert!(err.to_string().contains("Nameless"));

    Ok(())
}
