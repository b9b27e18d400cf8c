//! Integration tests running toolbar commands over TOML scene documents

use pretty_assertions::assert_eq;

use rect_arrange::geometry::bounds::selection_bounds;
use rect_arrange::scene::world_report;
use rect_arrange::{run_command, CommandRegistry, LayoutConfig, LayoutError, Scene, SceneFile, Vec3};

const TOOLBAR: &str = r#"
[canvas]
width = 400
height = 200

[[node]]
name = "toolbar"
size = [400, 40]
anchor_min = [0, 1]
anchor_max = [0, 1]
pivot = [0, 1]

[[node]]
name = "save"
parent = "toolbar"
size = [30, 30]
position = [-150, 0]

[[node]]
name = "open"
parent = "toolbar"
size = [30, 30]
position = [-100, 0]

[[node]]
name = "print"
parent = "toolbar"
size = [20, 20]
position = [-10, 0]

[[node]]
name = "close"
parent = "toolbar"
size = [30, 30]
position = [150, 0]
"#;

fn load() -> Scene {
    SceneFile::from_str(TOOLBAR)
        .expect("Should parse")
        .build()
        .expect("Should build")
}

fn ids(scene: &Scene, names: &[&str]) -> Vec<rect_arrange::NodeId> {
    names.iter().map(|n| scene.find(n).unwrap()).collect()
}

#[test]
fn test_distribute_buttons_in_toolbar() {
    let mut scene = load();
    let selection = ids(&scene, &["close", "save", "print", "open"]);

    let result = run_command(
        &mut scene,
        "distribute-horizontal",
        &selection,
        &LayoutConfig::default(),
    )
    .unwrap();
    assert_eq!(result, selection);

    insta::assert_snapshot!(world_report(&scene).unwrap().trim_end(), @r"
    toolbar x=0.00 y=160.00 w=400.00 h=40.00
      save x=35.00 y=165.00 w=30.00 h=30.00
      open x=135.00 y=165.00 w=30.00 h=30.00
      print x=240.00 y=170.00 w=20.00 h=20.00
      close x=335.00 y=165.00 w=30.00 h=30.00
    ");
}

#[test]
fn test_group_then_save_and_reload() {
    let mut scene = load();
    let config = LayoutConfig::default();
    let selection = ids(&scene, &["close", "save", "print", "open"]);
    run_command(&mut scene, "distribute-horizontal", &selection, &config).unwrap();
    let pair = ids(&scene, &["open", "save"]);
    run_command(&mut scene, "group", &pair, &config).unwrap();

    let report = world_report(&scene).unwrap();
    insta::assert_snapshot!(report.trim_end(), @r"
    toolbar x=0.00 y=160.00 w=400.00 h=40.00
      print x=240.00 y=170.00 w=20.00 h=20.00
      close x=335.00 y=165.00 w=30.00 h=30.00
      container x=35.00 y=165.00 w=130.00 h=30.00
        save x=35.00 y=165.00 w=30.00 h=30.00
        open x=135.00 y=165.00 w=30.00 h=30.00
    ");

    let text = SceneFile::from_scene(&scene).unwrap().to_toml().unwrap();
    let reloaded = SceneFile::from_str(&text).unwrap().build().unwrap();
    assert_eq!(world_report(&reloaded).unwrap(), report);
}

#[test]
fn test_bounds_of_named_nodes() {
    let scene = load();
    let bounds = selection_bounds(&scene, &ids(&scene, &["save", "close"])).unwrap();
    assert_eq!(bounds.min, Vec3::new(35.0, 165.0, 0.0));
    assert_eq!(bounds.max, Vec3::new(365.0, 195.0, 0.0));
}

#[test]
fn test_empty_selection_bounds_are_empty() {
    let scene = load();
    assert!(selection_bounds(&scene, &[]).unwrap().is_empty());
}

#[test]
fn test_ungroup_requires_single_node() {
    let mut scene = load();
    let pair = ids(&scene, &["save", "open"]);
    let err = run_command(&mut scene, "ungroup", &pair, &LayoutConfig::default()).unwrap_err();
    assert_eq!(err, LayoutError::MultipleSelection { count: 2 });
}

#[test]
fn test_config_file_changes_container() {
    let mut scene = load();
    let config = LayoutConfig::from_str("container_name = \"cluster\"\ncontainer_pivot = [0, 0]\n")
        .unwrap();
    let pair = ids(&scene, &["print", "close"]);
    let result = run_command(&mut scene, "group", &pair, &config).unwrap();
    assert_eq!(scene.find("cluster"), Some(result[0]));
}

#[test]
fn test_command_listing() {
    let listing: Vec<String> = CommandRegistry::standard()
        .iter()
        .map(|c| format!("{} {}", c.id, c.label))
        .collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    align-left Align Left
    align-right Align Right
    align-top Align Top
    align-bottom Align Bottom
    align-horizontal-center Align Horizontal Center
    align-vertical-center Align Vertical Center
    distribute-horizontal Distribute Horizontally
    distribute-vertical Distribute Vertically
    size-max Match Largest Size
    size-min Match Smallest Size
    group Make Group
    ungroup Ungroup
    ");
}
