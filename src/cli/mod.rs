//! CLI-facing workflows, independent of argument parsing

pub mod orchestration;

pub use orchestration::{
    apply_overrides, build_properties, properties_json, restore_properties, run_commit_workflow,
    run_tag_workflow, run_version_workflow, StoredVersion, VersionWorkflowArgs, WorkflowResult,
};
