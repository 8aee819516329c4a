//! Resources managed by the provider.
mod rls;
mod user;

pub use self::rls::RowLevelSecurityResource;
pub use self::rls::RowLevelSecurityResourceModel;
pub use self::user::UserResource;
pub use self::user::UserResourceModel;

/// Timestamp of the current time for `last_updated` attributes.
fn now_rfc3339() -> anyhow::Result<String> {
    let now = time::OffsetDateTime::now_utc();
    let now = now.format(&time::format_description::well_known::Rfc3339)?;
    Ok(now)
}
