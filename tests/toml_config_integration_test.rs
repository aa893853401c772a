use anyhow::Result;
use library_lookup::core::{ConfigProvider, CopyCounting};
use library_lookup::utils::validation::Validate;
use library_lookup::{LocalStorage, LookupEngine, LookupPipeline, TomlConfig};
use tempfile::TempDir;

const BOOKS: &str = r#"[
    {
        "id": "b1",
        "title": "Dune",
        "year": 1965,
        "availability": [
            {"location": "Central", "collection": "Fiction", "status": "Available", "call_number": ""},
            {"location": "North", "collection": "Fiction", "status": "Available", "call_number": ""}
        ]
    },
    {
        "id": "b2",
        "title": "Emma",
        "year": "1815",
        "availability": [
            {"location": "North", "collection": "Classics", "status": "Available", "call_number": ""}
        ]
    }
]"#;

fn write_config(dir: &TempDir, body: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join("library-lookup.toml");
    std::fs::write(&path, body)?;
    Ok(path)
}

#[tokio::test]
async fn test_toml_driven_render() -> Result<()> {
    let work = TempDir::new()?;
    let input = work.path().join("data");
    let output = work.path().join("site");
    std::fs::create_dir_all(&input)?;
    std::fs::write(input.join("catalogue.json"), BOOKS)?;

    let config_path = write_config(
        &work,
        &format!(
            r#"
[lookup]
name = "Nearby books"

[source]
input_path = "{}"
books_file = "catalogue.json"

[selection]
branches = ["Central"]

[render]
copy_counting = "inclusive"
page_title = "My list"

[load]
output_path = "{}"
page_file = "books.html"
write_render_json = true
"#,
            input.display(),
            output.display()
        ),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.copy_counting(), CopyCounting::Inclusive);

    let source = LocalStorage::new(config.input_path().to_string());
    let target = LocalStorage::new(config.output_path().to_string());
    let pipeline = LookupPipeline::new(source, target, config);
    let written = LookupEngine::new(pipeline).run().await?;

    assert!(written.ends_with("books.html"));
    let page = std::fs::read_to_string(output.join("books.html"))?;
    assert!(page.contains("<title>My list</title>"));

    let render: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("render.json"))?)?;
    assert_eq!(render["books"][0]["id"], "b1");
    // 包含模式下附近的那本也算進 available_copies
    assert_eq!(render["books"][0]["available_copies"], 2);
    assert_eq!(render["books"][1]["has_local_copies"], false);

    Ok(())
}

#[test]
fn test_env_substitution_in_paths() -> Result<()> {
    let work = TempDir::new()?;
    std::env::set_var("LIBRARY_LOOKUP_IT_DATA", work.path());

    let config = TomlConfig::from_toml_str(
        r#"
[lookup]
name = "Env"

[source]
input_path = "${LIBRARY_LOOKUP_IT_DATA}/in"

[load]
output_path = "${LIBRARY_LOOKUP_IT_DATA}/out"
"#,
    )?;

    assert_eq!(
        config.input_path(),
        format!("{}/in", work.path().display())
    );
    assert_eq!(config.page_file(), "index.html");
    assert!(config.branches().is_none());

    Ok(())
}

#[test]
fn test_invalid_page_file_fails_validation() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[lookup]
name = "Bad"

[source]
input_path = "./data"

[load]
output_path = "./site"
page_file = "books.txt"
"#,
    )?;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("load.page_file"));

    Ok(())
}
