use super::*;

#[test]
fn test_default_config() {
    let config = DepConfig::default();
    assert_eq!(config.obj_exts, vec![".o", ".do"]);
    assert_eq!(config.source_exts, vec![".cc", ".C", ".c"]);
    assert_eq!(config.link_ext, ".cc");
    assert!(config.skip_uppercase_dirs);
    assert!(config.include_dirs.is_empty());
}

#[test]
fn test_objdir_defaults() {
    let config = DepConfig::default();
    assert_eq!(config.objdir_for_arch(Some("i686-linux")), "obj/i686-linux/");
    assert_eq!(config.objdir_for_arch(None), "obj/");
    assert_eq!(config.objdir_for_arch(Some("")), "obj/");

    let config = DepConfig {
        objdir: Some("build".to_string()),
        ..Default::default()
    };
    assert_eq!(config.objdir_for_arch(Some("x86")), "build/");

    let config = DepConfig {
        objdir: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(config.objdir_for_arch(None), "");
}

#[test]
fn test_graph_options_resolve_relative_include_dirs() {
    let config = DepConfig {
        include_dirs: vec![PathBuf::from("include"), PathBuf::from("/opt/inc")],
        skip_uppercase_dirs: false,
        ..Default::default()
    };
    let options = config.graph_options(Path::new("/proj"));
    assert_eq!(
        options.include_dirs,
        vec![PathBuf::from("/proj/include"), PathBuf::from("/opt/inc")]
    );
    assert!(!options.prune.skip_uppercase);
    assert_eq!(options.search_roots()[0], PathBuf::from("/proj"));
}

#[test]
fn test_load_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cdeps.toml"),
        r#"
include_dirs = ["shared"]
objdir = "out/"
source_exts = [".cpp"]
"#,
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.include_dirs, vec![PathBuf::from("shared")]);
    assert_eq!(config.objdir.as_deref(), Some("out/"));
    assert_eq!(config.source_exts, vec![".cpp"]);
    // Unset fields keep their defaults
    assert_eq!(config.obj_exts, vec![".o", ".do"]);
}

#[test]
fn test_load_json_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".cdepsrc.json"),
        r#"{"link_ext": ".cpp", "prune_dirs": ["build"]}"#,
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.link_ext, ".cpp");
    assert_eq!(config.prune_dirs, vec!["build"]);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cdeps.toml"), "source_exts = 42").unwrap();

    assert_eq!(load_project_config(dir.path()), DepConfig::default());

    let err = load_config_file(&dir.path().join("cdeps.toml")).unwrap_err();
    assert!(matches!(err, DepError::Config { .. }));
}

#[test]
fn test_missing_config_is_default() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_project_config(dir.path()), DepConfig::default());
}

#[test]
fn test_example_config_parses() {
    let config: DepConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
    assert_eq!(config, DepConfig::default());
}
