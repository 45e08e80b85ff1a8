// Coordinators layer - Workflow orchestration
//
// Coordinators compose store operations for workflows that span more than
// one store call and record their own audit summary.

pub mod import_coordinator;

pub use import_coordinator::ImportCoordinator;
