use std::collections::HashSet;
use std::path::PathBuf;

use cmdweb::config_file::ConfigError;
use cmdweb::host::HostConfig;
use cmdweb::load_config;
use cmdweb::tree::{TreeBuilder, TreeError, TreeNode};

fn write_config(dir: &std::path::Path, content: &str) -> String {
    let path = dir.join(".cmdweb.yaml");
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn example_path() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("example.yaml")
        .to_string_lossy()
        .to_string()
}

fn build_example(root_prefix: &str) -> TreeNode {
    let (registry, _, _) = load_config(Some(&example_path())).unwrap();
    TreeBuilder::with_root_prefix(&registry, root_prefix)
        .build()
        .unwrap()
}

fn child_names(node: &TreeNode) -> Vec<&str> {
    node.children().iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_load_config_minimal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r"
cmdweb_version: '0.1.0'
root_prefix: /app
name: g
commands:
  - name: b
  - name: a
",
    );
    let (registry, host, config_path) = load_config(Some(&path)).unwrap();
    assert_eq!(config_path, dir.path().join(".cmdweb.yaml"));
    assert_eq!(host.root_prefix(), Ok("/app"));

    let tree = TreeBuilder::new(&registry, &host).unwrap().build().unwrap();
    assert_eq!(tree.path, "/app/g");
    assert_eq!(child_names(&tree), vec!["b", "a"]);
    assert_eq!(tree.children()[0].path, "/app/g/b");
    assert_eq!(tree.children()[1].path, "/app/g/a");
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let result = load_config(Some(&missing.to_string_lossy()));
    match result {
        Err(ConfigError::ConfigNotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected ConfigNotFound, got: {other:?}"),
    }
}

#[test]
fn test_load_config_duplicate_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r"
cmdweb_version: '0.1.0'
name: cli
commands:
  - name: sub
    commands:
      - name: dup
      - name: dup
        commands: []
",
    );
    match load_config(Some(&path)) {
        Err(ConfigError::DuplicateName { group, name }) => {
            assert_eq!(group, "cli.sub");
            assert_eq!(name, "dup");
        }
        other => panic!("Expected DuplicateName, got: {other:?}"),
    }
}

#[test]
fn test_load_config_invalid_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "cmdweb_version: '0.1.0'\nname: cli\ncommands:\n  - name: a/b\n",
    );
    assert!(matches!(
        load_config(Some(&path)),
        Err(ConfigError::InvalidName { .. })
    ));
}

#[test]
fn test_missing_root_prefix_fails_before_building() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "cmdweb_version: '0.1.0'\nname: cli\n");
    let (registry, host, _) = load_config(Some(&path)).unwrap();
    assert_eq!(host, HostConfig::default());
    assert!(matches!(
        TreeBuilder::new(&registry, &host),
        Err(TreeError::MissingConfiguration)
    ));
}

#[test]
fn test_example_ordering() {
    let tree = build_example("/");
    assert_eq!(tree.path, "/cli");
    assert_eq!(
        child_names(&tree),
        vec![
            "print-lines",
            "unicode-test",
            "simple-command",
            "textarea-command",
            "simple-command-missing-default-value",
            "variadic-args",
            "sub",
            "file-handling",
            "error-handling",
            "test-external",
        ]
    );
    let sub = tree.find("/cli/sub").unwrap();
    assert_eq!(child_names(sub), vec!["nargs-test", "sub2"]);
}

#[test]
fn test_example_paths_and_help() {
    let tree = build_example("/web/");
    let nested = tree
        .find("/web/cli/sub/sub2/a-nested-sub-command")
        .unwrap();
    assert_eq!(nested.short_help, "2:nd level sub command");

    let mounted = tree.find("/web/cli/test-external/flask-cli/run").unwrap();
    assert_eq!(mounted.short_help, "Run a local development server.");

    let unicode = tree.find("/web/cli/unicode-test").unwrap();
    assert_eq!(
        unicode.short_help,
        "Just print unicode message This helptext..."
    );
    assert!(unicode.help.as_deref().unwrap().contains("\u{8}\nThis is a help block"));

    let print_lines = tree.find("/web/cli/print-lines").unwrap();
    assert_eq!(
        print_lines.short_help,
        "Just print lines with delay (demonstrates..."
    );
}

#[test]
fn test_example_tree_properties() {
    let tree = build_example("/app");
    let mut seen = HashSet::new();
    for node in tree.iter() {
        assert!(seen.insert(node.path.clone()), "duplicate path {}", node.path);
        assert!(node.path.starts_with("/app/cli"));
        assert!(node.path.ends_with(&format!("/{}", node.name)));
        if let Some(ref children) = node.children {
            assert!(node.is_group);
            assert!(!children.is_empty());
            let first_group = children.iter().position(|c| c.is_group);
            if let Some(first_group) = first_group {
                assert!(children[first_group..].iter().all(|c| c.is_group));
            }
            for child in children {
                assert_eq!(child.path, format!("{}/{}", node.path, child.name));
            }
        }
        assert!(!node.short_help.contains('\u{8}'));
    }
    assert_eq!(seen.len(), 23);
}

#[test]
fn test_example_is_idempotent() {
    assert_eq!(build_example("/app"), build_example("/app"));
}

#[test]
fn test_document_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r"
cmdweb_version: '0.1.0'
name: g
commands:
  - name: sub
    commands: []
  - name: cmd
    help: Run it.
",
    );
    let (registry, _, _) = load_config(Some(&path)).unwrap();
    let tree = TreeBuilder::with_root_prefix(&registry, "/app")
        .build()
        .unwrap();
    let json = serde_json::to_string_pretty(&tree).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "is_group": true,
      "name": "g",
      "short_help": "",
      "path": "/app/g",
      "children": [
        {
          "is_group": false,
          "name": "cmd",
          "short_help": "Run it.",
          "help": "Run it.",
          "path": "/app/g/cmd"
        },
        {
          "is_group": true,
          "name": "sub",
          "short_help": "",
          "path": "/app/g/sub"
        }
      ]
    }
    "#);

    let parsed: TreeNode = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, tree);
}

#[test]
fn test_resolve_example_collects_group_params() {
    let (registry, _, _) = load_config(Some(&example_path())).unwrap();
    let invocation = registry
        .resolve(&["cli", "sub", "sub2", "a-nested-sub-command"])
        .unwrap();
    let debug_flags: Vec<&str> = invocation
        .scopes()
        .filter(|(_, params)| params.iter().any(|p| p.name == "debug"))
        .map(|(name, _)| name)
        .collect();
    assert_eq!(debug_flags, vec!["cli", "a-nested-sub-command"]);

    let builder = TreeBuilder::with_root_prefix(&registry, "/app");
    let subtree = builder.build_at(&invocation).unwrap();
    assert_eq!(subtree.path, "/app/cli/sub/sub2/a-nested-sub-command");
}
