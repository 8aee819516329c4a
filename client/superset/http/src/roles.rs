//! Role lookups against the Superset security API.
use anyhow::Context;
use anyhow::Result;

use superset_client::error::AmbiguousRole;
use superset_client::error::ResourceIdentifier;
use superset_client::error::ResourceNotFound;
use superset_client::models::Role;

use super::HttpClient;

const PATH_ROLES: &str = "api/v1/security/roles/";

/// Find the ID of the only role named exactly `name`.
///
/// Lookups matching no role fail with [`ResourceNotFound`] and
/// lookups matching more than one role fail with [`AmbiguousRole`].
pub async fn id_by_name(client: &HttpClient, name: &str) -> Result<i64> {
    let query = format!(
        "(filters:!((col:name,opr:eq,value:{})),page_size:100)",
        rison_string(name),
    );
    let request = client
        .client
        .get(format!("{}{}", client.base, PATH_ROLES))
        .query(&[("q", query)]);
    let roles = client
        .read::<Vec<Role>>("find role by name", request)
        .await
        .with_context(|| ResourceIdentifier::reference("role", name))?;

    // Filters may be applied loosely by the server so only keep exact matches.
    let matches: Vec<&Role> = roles.iter().filter(|role| role.name == name).collect();
    match matches.as_slice() {
        [] => Err(anyhow::anyhow!(ResourceNotFound))
            .with_context(|| ResourceIdentifier::reference("role", name)),
        [role] => Ok(role.id),
        many => anyhow::bail!(AmbiguousRole {
            count: many.len(),
            name: name.to_string(),
        }),
    }
}

/// Encode a value as a quoted rison string.
fn rison_string(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len() + 2);
    encoded.push('\'');
    for c in value.chars() {
        if c == '!' || c == '\'' {
            encoded.push('!');
        }
        encoded.push(c);
    }
    encoded.push('\'');
    encoded
}

#[cfg(test)]
mod tests {
    use super::rison_string;

    #[test]
    fn rison_quotes_plain_names() {
        assert_eq!(rison_string("Admin"), "'Admin'");
        assert_eq!(rison_string("sql lab"), "'sql lab'");
    }

    #[test]
    fn rison_escapes_specials() {
        assert_eq!(rison_string("it's"), "'it!'s'");
        assert_eq!(rison_string("wow!"), "'wow!!'");
    }
}
