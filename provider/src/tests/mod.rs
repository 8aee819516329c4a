use superset_client::fixture::Client as Fixture;

use crate::Provider;

mod conf;

/// Provider backed by an in-memory Superset fixture with the default roles.
fn provider() -> (Provider, Fixture) {
    let fixture = Fixture::default();
    fixture.append_role(1, "Admin");
    fixture.append_role(4, "Gamma");
    let provider = Provider::with_client(fixture.clone());
    (provider, fixture)
}
