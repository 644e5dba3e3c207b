//! Request bodies sent to the backend. Every body is tagged by `caso`.

use serde::{Deserialize, Serialize};

use super::descriptor::FormBody;

pub const CASO_INSERT: &str = "INSERT";

/// Fetch the descriptor for a case on behalf of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchFormRequest {
    pub caso: String,
    pub id_usuario: i64,
}

/// Submit a reshaped form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitFormRequest {
    pub caso: String,
    pub user: i64,
    pub data: SubmissionData,
}

impl SubmitFormRequest {
    pub fn insert(user: i64, data: SubmissionData) -> Self {
        Self {
            caso: CASO_INSERT.to_string(),
            user,
            data,
        }
    }
}

/// The reshaped body plus the descriptor metadata the backend needs to file it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionData {
    pub id: i64,
    pub name: String,
    pub form: FormBody,
}
