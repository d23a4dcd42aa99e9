mod common;

use common::*;
use modfiles_api::{LinkMode, Module, OptionMap, ResolutionOptions};
use modfiles_core::terminus::StaticEnvironment;
use serde_json::json;
use std::path::PathBuf;

#[test]
fn test_forwards_extra_options_unchanged() {
    let h = Harness::new();
    let options = ResolutionOptions::new()
        .with_option("testing", "one")
        .with_option("other", "two");

    let result = h.terminus.search(URI, &options).unwrap();
    assert_eq!(result.map(|instances| instances.len()), Some(2));

    let calls = h.expander.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (path, links, forwarded) = &calls[0];

    let mut expected = OptionMap::new();
    expected.insert("testing".to_string(), json!("one"));
    expected.insert("other".to_string(), json!("two"));

    assert_eq!(path, &PathBuf::from(MODULE_FILE));
    assert_eq!(*links, None);
    assert_eq!(forwarded, &expected);
}

#[test]
fn test_node_is_not_forwarded_to_expander() {
    let h = Harness::new();
    h.nodes.register(modfiles_api::Node::new("mynode", None));
    let options = ResolutionOptions::new()
        .with_node("mynode")
        .with_links(LinkMode::Follow)
        .with_option("recurse", true);

    h.terminus.search(URI, &options).unwrap();

    let calls = h.expander.calls.lock().unwrap();
    let (_, links, forwarded) = &calls[0];
    assert_eq!(*links, Some(LinkMode::Follow));
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded["recurse"], json!(true));
}

#[test]
fn test_missing_module_is_none_not_empty() {
    let h = Harness::build(
        RecordingModules::default(),
        RecordingFileSystem::default(),
        StaticEnvironment::unset(),
        RecordingAuthorizer::answering(true),
    );

    let result = h.terminus.search(URI, &ResolutionOptions::new()).unwrap();
    assert!(result.is_none());
    assert!(h.filesystem.calls().is_empty());
    assert!(h.expander.calls.lock().unwrap().is_empty());
}

#[test]
fn test_missing_file_is_none() {
    let h = Harness::build(
        RecordingModules::with(vec![("my", Module::new("mymod", "/module/path"))]),
        RecordingFileSystem::default(),
        StaticEnvironment::unset(),
        RecordingAuthorizer::answering(true),
    );

    let result = h.terminus.search(URI, &ResolutionOptions::new()).unwrap();
    assert!(result.is_none());
    assert!(h.expander.calls.lock().unwrap().is_empty());
}

#[test]
fn test_resolved_but_empty() {
    let mut h = Harness::new();
    h.expander = std::sync::Arc::new(RecordingExpander::default());
    let terminus = modfiles_core::ModuleFilesTerminus::<TestInstance>::builder(
        h.modules.clone(),
        h.factory.clone(),
        h.expander.clone(),
    )
    .with_filesystem(h.filesystem.clone())
    .build();

    let result = terminus.search(URI, &ResolutionOptions::new()).unwrap();
    assert_eq!(result, Some(vec![]));

    let calls = h.expander.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PathBuf::from(MODULE_FILE));
    assert!(calls[0].2.is_empty());
}

#[test]
fn test_no_options_forwards_empty_map() {
    let h = Harness::new();

    h.terminus.search(URI, &ResolutionOptions::new()).unwrap();

    let calls = h.expander.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (path, links, forwarded) = &calls[0];
    assert_eq!(path, &PathBuf::from(MODULE_FILE));
    assert_eq!(*links, None);
    assert_eq!(forwarded, &OptionMap::new());
}

#[test]
fn test_ipaddress_is_forwarded_to_expander() {
    let h = Harness::new();
    let options = ResolutionOptions::new()
        .with_ipaddress("10.0.0.5")
        .with_option("testing", "one");

    h.terminus.search(URI, &options).unwrap();

    let calls = h.expander.calls.lock().unwrap();
    let (_, _, forwarded) = &calls[0];
    assert_eq!(forwarded.len(), 2);
    assert_eq!(forwarded["ipaddress"], json!("10.0.0.5"));
    assert_eq!(forwarded["testing"], json!("one"));
}
