//! End-to-end tests for building FSM plugin entries from a configuration.

use fsm_config::plugin::Field;
use fsm_config::{ConfError, ConfigEntry, Ovsh};

fn parse(src: &str) -> toml::Table {
    toml::from_str(src).expect("test config must be valid TOML")
}

const VALID_P1: &str = r#"
[fsm_plugins.p1]
handler = "h1"
if_name = "eth0"
pkt_capt_filter = "tcp"
plugin = "/usr/lib/p1.so"
other_config = "{'mqtt_topic': 'x'}"
"#;

fn plugin_block(name: &str, skip: Option<&str>) -> String {
    let fields = [
        ("handler", format!("\"h_{name}\"")),
        ("if_name", "\"br-home\"".to_string()),
        ("pkt_capt_filter", "\"udp port 53\"".to_string()),
        ("plugin", format!("\"/usr/plume/lib/libfsm_{name}.so\"")),
        ("other_config", "\"{'mqtt_v': 'dev-test/fsm'}\"".to_string()),
    ];

    let mut block = format!("[fsm_plugins.{name}]\n");
    for (field, value) in fields {
        if Some(field) != skip {
            block.push_str(&format!("{field} = {value}\n"));
        }
    }
    block
}

// =============================================================================
// Successful construction
// =============================================================================

#[test]
fn test_single_plugin_end_to_end() {
    let entry = ConfigEntry::new(&parse(VALID_P1), &Ovsh::default()).unwrap();

    assert_eq!(entry.len(), 1);
    let node = &entry.nodes()[0];
    assert_eq!(node.insert_cmd.len(), 1);
    assert_eq!(node.delete_cmd.len(), 1);
    assert_eq!(
        node.insert_cmd[0],
        r#"/usr/plume/tools/ovsh i Flow_Service_Manager_Config handler:="h1" if_name:="eth0" pkt_capt_filter:="tcp" plugin:="/usr/lib/p1.so" other_config:=["map",[["mqtt_topic","x"]]]"#
    );
    assert_eq!(
        node.delete_cmd[0],
        "/usr/plume/tools/ovsh d Flow_Service_Manager_Config -w handler==h1"
    );
}

#[test]
fn test_nodes_follow_declaration_order() {
    let src = [plugin_block("walleye", None), plugin_block("dns", None), plugin_block("http", None)]
        .join("\n");
    let entry = ConfigEntry::new(&parse(&src), &Ovsh::default()).unwrap();

    let names: Vec<&str> = entry.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(names, vec!["walleye", "dns", "http"]);

    let deletes: Vec<&str> = entry.delete_commands().collect();
    assert_eq!(deletes.len(), 3);
    assert!(deletes[1].ends_with("-w handler==h_dns"));
    assert_eq!(entry.insert_commands().count(), 3);
    assert!(entry.get("http").is_some());
    assert!(entry.get("ndp").is_none());
}

#[test]
fn test_building_twice_is_identical() {
    let config = parse(VALID_P1);
    let first = ConfigEntry::new(&config, &Ovsh::default()).unwrap();
    let second = ConfigEntry::new(&config, &Ovsh::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.nodes()[0].insert_cmd, second.nodes()[0].insert_cmd);
}

#[test]
fn test_custom_tool_path() {
    let entry = ConfigEntry::new(&parse(VALID_P1), &Ovsh::new("/tmp/ovsh")).unwrap();
    assert!(entry.nodes()[0].insert_cmd[0].starts_with("/tmp/ovsh i Flow_Service_Manager_Config "));
    assert!(entry.nodes()[0].delete_cmd[0].starts_with("/tmp/ovsh d "));
}

// =============================================================================
// Validation failures
// =============================================================================

#[test]
fn test_each_missing_field_is_named() {
    for field in Field::ALL {
        let src = plugin_block("p", Some(field.name()));
        let err = ConfigEntry::new(&parse(&src), &Ovsh::default()).unwrap_err();

        assert!(
            matches!(err, ConfError::MissingField { .. }),
            "{field}: unexpected {err:?}"
        );
        assert_eq!(err.field(), Some(field.name()));
        assert!(err.to_string().contains(&format!("p is missing {field} field")));
    }
}

#[test]
fn test_empty_values_are_rejected() {
    for empty in ["\"\"", "0", "false", "[]", "{}"] {
        let src = VALID_P1.replace("\"h1\"", empty);
        let err = ConfigEntry::new(&parse(&src), &Ovsh::default()).unwrap_err();

        assert!(
            matches!(err, ConfError::EmptyValue { field: "handler", .. }),
            "{empty}: unexpected {err:?}"
        );
        assert!(err.to_string().contains("handler has no value set"));
    }
}

#[test]
fn test_empty_other_config_string_is_empty_not_malformed() {
    let src = VALID_P1.replace("\"{'mqtt_topic': 'x'}\"", "\"\"");
    let err = ConfigEntry::new(&parse(&src), &Ovsh::default()).unwrap_err();
    assert!(matches!(err, ConfError::EmptyValue { field: "other_config", .. }));
}

#[test]
fn test_malformed_other_config_literals() {
    for bad in [
        "{'mqtt_topic': 'x'",
        "{'mqtt_topic' 'x'}",
        "mqtt_topic=x",
        "[1, 2]",
        "42",
        "{'nested': {'a': 'b'}}",
    ] {
        let src = VALID_P1.replace("{'mqtt_topic': 'x'}", bad);
        let err = ConfigEntry::new(&parse(&src), &Ovsh::default()).unwrap_err();

        assert!(
            matches!(err, ConfError::MalformedLiteral { field: "other_config", .. }),
            "{bad}: unexpected {err:?}"
        );
        assert!(err.to_string().contains("other_config value has wrong format"));
    }
}

#[test]
fn test_second_plugin_invalid_yields_no_nodes() {
    let src = [plugin_block("good", None), plugin_block("bad", Some("plugin"))].join("\n");
    let result = ConfigEntry::new(&parse(&src), &Ovsh::default());

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("bad is missing plugin field"));
}

#[test]
fn test_first_invalid_plugin_in_order_is_reported() {
    let src = [
        plugin_block("alpha", Some("if_name")),
        plugin_block("beta", Some("handler")),
    ]
    .join("\n");
    let err = ConfigEntry::new(&parse(&src), &Ovsh::default()).unwrap_err();
    assert!(err.to_string().starts_with("alpha is missing if_name field"));
}

#[test]
fn test_missing_section() {
    let err = ConfigEntry::new(&parse("[fsm]\n"), &Ovsh::default()).unwrap_err();
    assert!(matches!(err, ConfError::MissingSection(_)));
}
