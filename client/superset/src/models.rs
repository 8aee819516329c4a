//! Records exchanged with the Superset security API.
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// A Superset role, as embedded in user records or returned by role lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Numeric identifier of the role.
    pub id: i64,

    /// Name of the role.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A Superset user as reported by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric identifier of the user, immutable after creation.
    pub id: i64,

    /// Login name of the user, immutable after creation.
    pub username: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Inactive users are unable to log in.
    #[serde(default)]
    pub active: bool,

    /// Roles granted to the user, in the order the server returned them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Role>,
}

impl User {
    /// IDs of the roles granted to the user, in server order.
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|role| role.id).collect()
    }
}

/// Desired attributes of a user to create or update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpec {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Password to set for the user.
    ///
    /// An empty password is never sent: on update it leaves the stored password unchanged.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    pub active: bool,

    /// IDs of the roles to grant the user.
    pub roles: Vec<i64>,
}

/// How a row level security rule combines with other rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    /// Filters are applied to queries by the listed roles.
    #[default]
    Regular,

    /// Filters are applied to all queries except those by the listed roles.
    Base,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Regular => "Regular",
            FilterType::Base => "Base",
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterType {
    type Err = crate::error::InvalidFilterType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Regular" => Ok(FilterType::Regular),
            "Base" => Ok(FilterType::Base),
            other => Err(crate::error::InvalidFilterType {
                value: other.to_string(),
            }),
        }
    }
}

/// A row level security rule as reported by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLevelSecurity {
    /// Numeric identifier of the rule.
    pub id: i64,

    pub name: String,

    /// SQL predicate added to queries against the rule's tables.
    #[serde(default, deserialize_with = "null_as_default")]
    pub clause: String,

    /// Rules sharing a group key are combined with OR, other rules with AND.
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_key: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub filter_type: FilterType,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// IDs of the datasets the rule applies to, in server order.
    #[serde(default, deserialize_with = "id_list")]
    pub tables: Vec<i64>,

    /// IDs of the roles the rule applies to, in server order.
    #[serde(default, rename = "roles", deserialize_with = "id_list")]
    pub role_ids: Vec<i64>,
}

/// Desired attributes of a row level security rule to create or update.
///
/// All fields are always sent so empty strings clear values on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLevelSecuritySpec {
    pub name: String,
    pub tables: Vec<i64>,
    pub clause: String,

    /// IDs of the roles the rule applies to.
    pub roles: Vec<i64>,

    pub group_key: String,
    pub filter_type: FilterType,
    pub description: String,
}

/// Decode `null` values into the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Reference to a related entity: either a bare ID or an object with an `id` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRef {
    Id(i64),
    Object { id: i64 },
}

/// Decode a list of related entities into their IDs, preserving order.
fn id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<IdRef>>::deserialize(deserializer)?.unwrap_or_default();
    let ids = refs
        .into_iter()
        .map(|item| match item {
            IdRef::Id(id) => id,
            IdRef::Object { id } => id,
        })
        .collect();
    Ok(ids)
}
