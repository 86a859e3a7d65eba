use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::generator::ddl_generator::{generate_ddls, DdlOptions, GeneratedDdl};
use crate::generator::dialect::Dialect;
use crate::inference::rules::RuleSet;
use crate::parser::select::parse_fields;

/// A generation request in the JSON shape clients send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    /// SQL text: a `SELECT` statement or a bare field list.
    pub sql: String,
    /// Requested dialect identifiers; empty means Spark only.
    pub database_types: Vec<String>,
    /// Caller rules keyed by dialect identifier.
    pub rules_by_database: RuleSet,
    /// Table name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Table comment override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_comment: Option<String>,
}

impl GenerateRequest {
    /// A request for `sql` with every other setting defaulted.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    /// Decode a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Requested dialects, falling back to Spark when none were given.
    pub fn dialects(&self) -> Vec<String> {
        let requested: Vec<String> = self
            .database_types
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        if requested.is_empty() {
            vec![Dialect::DEFAULT.id().to_string()]
        } else {
            requested
        }
    }

    /// Table options with unset or blank overrides replaced by defaults.
    pub fn options(&self) -> DdlOptions {
        let defaults = DdlOptions::default();
        DdlOptions {
            table_name: self
                .table_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map_or(defaults.table_name, str::to_string),
            table_comment: self.table_comment.clone().unwrap_or(defaults.table_comment),
        }
    }

    /// Parse the SQL and render every requested dialect.
    pub fn generate(&self) -> Result<Vec<GeneratedDdl>> {
        if self.sql.trim().is_empty() {
            return Err(Error::EmptySql);
        }
        let fields = parse_fields(&self.sql)?;
        let dialects = self.dialects();
        debug!(fields = fields.len(), dialects = ?dialects, "generating DDL");
        Ok(generate_ddls(
            &fields,
            &self.rules_by_database,
            &dialects,
            &self.options(),
        ))
    }

    /// [`GenerateRequest::generate`] wrapped in the response shape.
    pub fn process(&self) -> Result<GenerateResponse> {
        self.generate().map(GenerateResponse::from_ddls)
    }
}

/// A successful response: a bare `ddl` for one statement, a `ddls` list otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    /// Exactly one statement was produced.
    Single {
        /// The DDL text.
        ddl: String,
    },
    /// Zero or several statements were produced.
    Multiple {
        /// Statements in request order.
        ddls: Vec<GeneratedDdl>,
    },
}

impl GenerateResponse {
    /// Choose the response shape from the number of statements.
    pub fn from_ddls(mut ddls: Vec<GeneratedDdl>) -> Self {
        if ddls.len() == 1 {
            if let Some(only) = ddls.pop() {
                return GenerateResponse::Single { ddl: only.ddl };
            }
        }
        GenerateResponse::Multiple { ddls }
    }
}

/// The JSON body reported for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
