//! Test suite definitions
//!
//! The built-in suite is a set of literal data tables. The same structure
//! can be loaded from a YAML file so other tables run without a rebuild.

use serde::Deserialize;
use std::fmt::{self, Display};
use std::path::Path;

use crate::api::{NewPost, PostPatch, PostReplacement, RequestInput};
use crate::common::{Error, Result};

/// Ids that exist on the server
pub const VALID_IDS: [u64; 3] = [1, 5, 10];

/// Ids that the server answers with 404
pub const INVALID_IDS: [u64; 2] = [9999, 12345];

/// (title, body, userId)
pub const CREATE_POSTS: [(&str, &str, u64); 2] = [("foo1", "bar1", 1), ("foo2", "bar2", 2)];

/// (id, title, body)
pub const UPDATE_POSTS: [(u64, &str, &str); 2] = [
    (1, "updated title 1", "updated body 1"),
    (2, "updated title 2", "updated body 2"),
];

/// (id, new title)
pub const PATCH_POSTS: [(u64, &str); 2] = [(1, "patched title 1"), (2, "patched title 2")];

/// A complete test suite, built in or loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct Suite {
    /// Name of the suite
    pub name: String,
    /// Optional description of what the suite covers
    pub description: Option<String>,
    /// Epic label attached to every case
    #[serde(default = "default_epic")]
    pub epic: String,
    /// Feature label attached to every case
    #[serde(default = "default_feature")]
    pub feature: String,
    /// Test cases, each expanding to one run per data row
    pub cases: Vec<TestCase>,
}

fn default_epic() -> String {
    "JSONPlaceholder API Tests".to_string()
}

fn default_feature() -> String {
    "Posts API".to_string()
}

/// One parameterized test case
#[derive(Deserialize, Debug, Clone)]
pub struct TestCase {
    /// Report story; defaults per operation
    pub story: Option<String>,
    /// Report severity; defaults per operation
    pub severity: Option<Severity>,
    /// The operation and its data table
    #[serde(flatten)]
    pub operation: Operation,
}

impl TestCase {
    fn new(operation: Operation) -> Self {
        Self {
            story: None,
            severity: None,
            operation,
        }
    }

    pub fn story(&self) -> &str {
        self.story
            .as_deref()
            .unwrap_or_else(|| self.operation.default_story())
    }

    pub fn severity(&self) -> Severity {
        self.severity
            .unwrap_or_else(|| self.operation.default_severity())
    }
}

/// Operation against the posts resource together with its data table
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Operation {
    /// `GET /posts/{id}` for ids that exist
    FetchValid { ids: Vec<u64> },
    /// `GET /posts/{id}` for ids that do not exist
    FetchMissing { ids: Vec<u64> },
    /// `POST /posts`
    Create { rows: Vec<CreateRow> },
    /// `PUT /posts/{id}`
    Update { rows: Vec<UpdateRow> },
    /// `PATCH /posts/{id}` with a new title
    Patch { rows: Vec<PatchRow> },
    /// `DELETE /posts/{id}`
    Delete { ids: Vec<u64> },
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateRow {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateRow {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PatchRow {
    pub id: u64,
    pub title: String,
}

/// Report severity, ordered as Allure orders them
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocker,
    Critical,
    Normal,
    Minor,
    Trivial,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Blocker => "blocker",
            Severity::Critical => "critical",
            Severity::Normal => "normal",
            Severity::Minor => "minor",
            Severity::Trivial => "trivial",
        };
        f.write_str(label)
    }
}

/// A single data row of an operation, i.e. one test execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioRow {
    FetchValid(u64),
    FetchMissing(u64),
    Create(NewPost),
    Update(PostReplacement),
    Patch { id: u64, patch: PostPatch },
    Delete(u64),
}

impl Operation {
    /// Stable identifier, used in report names
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FetchValid { .. } => "fetch_valid",
            Operation::FetchMissing { .. } => "fetch_missing",
            Operation::Create { .. } => "create",
            Operation::Update { .. } => "update",
            Operation::Patch { .. } => "patch",
            Operation::Delete { .. } => "delete",
        }
    }

    pub fn default_story(&self) -> &'static str {
        match self {
            Operation::FetchValid { .. } => "Get post by ID",
            Operation::FetchMissing { .. } => "Get post by invalid ID",
            Operation::Create { .. } => "Create post",
            Operation::Update { .. } => "Update post (PUT)",
            Operation::Patch { .. } => "Partial update post (PATCH)",
            Operation::Delete { .. } => "Delete post",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Operation::Create { .. } => Severity::Blocker,
            Operation::Delete { .. } => Severity::Normal,
            _ => Severity::Critical,
        }
    }

    /// Expand the data table into one row per execution
    pub fn rows(&self) -> Vec<ScenarioRow> {
        match self {
            Operation::FetchValid { ids } => ids.iter().copied().map(ScenarioRow::FetchValid).collect(),
            Operation::FetchMissing { ids } => {
                ids.iter().copied().map(ScenarioRow::FetchMissing).collect()
            }
            Operation::Create { rows } => rows
                .iter()
                .map(|row| {
                    ScenarioRow::Create(NewPost {
                        title: row.title.clone(),
                        body: row.body.clone(),
                        user_id: row.user_id,
                    })
                })
                .collect(),
            Operation::Update { rows } => rows
                .iter()
                .map(|row| ScenarioRow::Update(PostReplacement::new(row.id, &row.title, &row.body)))
                .collect(),
            Operation::Patch { rows } => rows
                .iter()
                .map(|row| ScenarioRow::Patch {
                    id: row.id,
                    patch: PostPatch {
                        title: row.title.clone(),
                    },
                })
                .collect(),
            Operation::Delete { ids } => ids.iter().copied().map(ScenarioRow::Delete).collect(),
        }
    }
}

impl ScenarioRow {
    /// Build the request this row sends
    pub fn request(&self) -> Result<RequestInput> {
        match self {
            ScenarioRow::FetchValid(id) | ScenarioRow::FetchMissing(id) => {
                Ok(RequestInput::get_post(*id))
            }
            ScenarioRow::Create(post) => RequestInput::create_post(post),
            ScenarioRow::Update(update) => RequestInput::replace_post(update),
            ScenarioRow::Patch { id, patch } => RequestInput::patch_post(*id, patch),
            ScenarioRow::Delete(id) => Ok(RequestInput::delete_post(*id)),
        }
    }

    /// Text recorded in place of a request body for bodyless requests
    pub fn request_note(&self) -> &'static str {
        match self {
            ScenarioRow::FetchMissing(_) => "Request sent for invalid ID",
            _ => "Request sent",
        }
    }

    /// Row inputs as report parameters
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        match self {
            ScenarioRow::FetchValid(id) | ScenarioRow::FetchMissing(id) | ScenarioRow::Delete(id) => {
                vec![("id", id.to_string())]
            }
            ScenarioRow::Create(post) => vec![
                ("title", post.title.clone()),
                ("body", post.body.clone()),
                ("userId", post.user_id.to_string()),
            ],
            ScenarioRow::Update(update) => vec![
                ("id", update.id.to_string()),
                ("title", update.title.clone()),
                ("body", update.body.clone()),
            ],
            ScenarioRow::Patch { id, patch } => {
                vec![("id", id.to_string()), ("title", patch.title.clone())]
            }
        }
    }
}

impl Suite {
    /// The posts suite with its literal data tables
    pub fn builtin() -> Self {
        let cases = vec![
            Operation::FetchValid {
                ids: VALID_IDS.to_vec(),
            },
            Operation::FetchMissing {
                ids: INVALID_IDS.to_vec(),
            },
            Operation::Create {
                rows: CREATE_POSTS
                    .iter()
                    .map(|(title, body, user_id)| CreateRow {
                        title: title.to_string(),
                        body: body.to_string(),
                        user_id: *user_id,
                    })
                    .collect(),
            },
            Operation::Update {
                rows: UPDATE_POSTS
                    .iter()
                    .map(|(id, title, body)| UpdateRow {
                        id: *id,
                        title: title.to_string(),
                        body: body.to_string(),
                    })
                    .collect(),
            },
            Operation::Patch {
                rows: PATCH_POSTS
                    .iter()
                    .map(|(id, title)| PatchRow {
                        id: *id,
                        title: title.to_string(),
                    })
                    .collect(),
            },
            Operation::Delete {
                ids: VALID_IDS.to_vec(),
            },
        ];

        Self {
            name: "Posts API".to_string(),
            description: Some("CRUD checks against the posts resource".to_string()),
            epic: default_epic(),
            feature: default_feature(),
            cases: cases.into_iter().map(TestCase::new).collect(),
        }
    }

    /// Load a suite from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read test suite '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    /// Parse a suite from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        let suite: Suite = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse test suite: {}", e)))?;

        if suite.cases.is_empty() {
            return Err(Error::Config(format!("Test suite '{}' has no cases", suite.name)));
        }

        Ok(suite)
    }

    /// Every (case, row) pair in execution order
    pub fn rows(&self) -> Vec<(&TestCase, ScenarioRow)> {
        self.cases
            .iter()
            .flat_map(|case| case.operation.rows().into_iter().map(move |row| (case, row)))
            .collect()
    }
}
