use tailwind_config::{pipe_descriptor, ConfigDescriptor, ConfigError, PipeArgs};

fn pipe_args(minify: bool, strict: bool) -> PipeArgs {
    PipeArgs { minify, strict }
}

async fn pipe(input: &str, args: &PipeArgs) -> Result<String, ConfigError> {
    let mut reader = input.as_bytes();
    let mut written: Vec<u8> = Vec::new();
    pipe_descriptor(&mut reader, &mut written, args).await?;
    Ok(String::from_utf8(written).unwrap())
}

#[tokio::test]
async fn test_pipe_normalizes_to_pretty_json() {
    let output = pipe(r#"{"content": ["./src/**/*.rs"]}"#, &pipe_args(false, false))
        .await
        .unwrap();

    // Pretty output is multi-line and parses back to the same descriptor
    assert!(output.trim_end().contains('\n'));
    let parsed = ConfigDescriptor::from_json_str(&output).unwrap();
    assert_eq!(parsed.content_globs(), &["./src/**/*.rs"]);

    // Omitted fields come back filled with their defaults
    assert!(parsed.theme_token("fontFamily", "anton").is_some());
    assert!(parsed.plugin_refs().is_empty());
}

#[tokio::test]
async fn test_pipe_minify_emits_compact_json() {
    let output = pipe(r#"{"content": ["./src/**/*.rs"]}"#, &pipe_args(true, false))
        .await
        .unwrap();

    // Compact form, single trailing newline
    assert!(!output.trim_end().contains('\n'));
    assert!(output.ends_with('\n'));
    assert!(output.starts_with(r#"{"content":["#));

    let parsed = ConfigDescriptor::from_json_str(&output).unwrap();
    assert_eq!(parsed.content_globs(), &["./src/**/*.rs"]);
}

#[tokio::test]
async fn test_pipe_rejects_empty_input() {
    let result = pipe("  \n", &pipe_args(false, false)).await;
    assert!(matches!(result, Err(ConfigError::InputError(_))));

    let error_msg = format!("{}", result.unwrap_err());
    assert!(
        error_msg.contains("stdin"),
        "Error should point at stdin: {}",
        error_msg
    );
}

#[tokio::test]
async fn test_pipe_rejects_invalid_descriptor() {
    let result = pipe(r#"{"content": [""]}"#, &pipe_args(false, false)).await;
    assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
}

#[tokio::test]
async fn test_pipe_strict_fails_on_warnings() {
    // Duplicate content glob is only a warning
    let duplicated = r#"{"content": ["./src/**/*.rs", "./src/**/*.rs"]}"#;

    let lenient = pipe(duplicated, &pipe_args(false, false)).await;
    assert!(lenient.is_ok());

    let strict = pipe(duplicated, &pipe_args(false, true)).await;
    assert!(matches!(strict, Err(ConfigError::ValidationFailed(_))));

    let error_msg = format!("{}", strict.unwrap_err());
    assert!(
        error_msg.contains("duplicate"),
        "Error should name the warning: {}",
        error_msg
    );
}

#[tokio::test]
async fn test_pipe_rejects_shape_violations() {
    let result = pipe(r#"{"plugins": "typography"}"#, &pipe_args(false, false)).await;
    assert!(matches!(result, Err(ConfigError::ConfigError { .. })));
}
