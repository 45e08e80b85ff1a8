use serde::Serialize;

/// Operator-supplied subnet fields for create and update
#[derive(Debug, Clone, Serialize)]
pub struct SubnetFields {
    pub network: String,
    pub mask: i32,
    pub description: String,
}
