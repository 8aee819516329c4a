use std::collections::HashMap;

use superset_client_http::ClientOptions;

use crate::conf::Error;
use crate::Context;
use crate::Provider;
use crate::ProviderConf;

fn decode(yaml: &str) -> ProviderConf {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn decode_with_defaults() {
    let conf = decode("host: http://superset-host\nusername: admin\npassword: admin\n");
    assert_eq!(conf.host, "http://superset-host");
    assert_eq!(conf.timeout, 30);
    assert_eq!(conf.timeout_connect, 5);
}

#[test]
fn env_overrides_file() {
    let env: HashMap<&str, &str> = [
        ("SUPERSET_HOST", "https://override"),
        ("SUPERSET_PASSWORD", "secret"),
        ("SUPERSET_USERNAME", ""),
    ]
    .into_iter()
    .collect();
    let conf = decode("host: http://superset-host\nusername: admin\npassword: admin\n")
        .overrides_from(|name| env.get(name).map(|value| value.to_string()));
    assert_eq!(conf.host, "https://override");
    assert_eq!(conf.password, "secret");
    assert_eq!(conf.username, "admin");
}

#[test]
fn validate_requires_host_and_username() {
    let conf = decode("username: admin\n");
    let error = conf.validate().unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::MissingAttribute("host"))
    ));

    let conf = decode("host: http://superset-host\n");
    let error = conf.validate().unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::MissingAttribute("username"))
    ));
}

#[test]
fn debug_redacts_password() {
    let conf = decode("host: http://superset-host\nusername: admin\npassword: hunter2\n");
    let debug = format!("{:?}", conf);
    assert!(!debug.contains("hunter2"));
}

#[test]
fn client_options_from_conf() {
    let conf = decode("host: http://superset-host\nusername: admin\npassword: admin\ntimeout: 10\n");
    let options = ClientOptions::from(&conf);
    assert_eq!(options.address, "http://superset-host/");
    assert_eq!(options.timeout, std::time::Duration::from_secs(10));
    assert_eq!(options.username, "admin");
}

#[test]
fn load_missing_file() {
    let error = crate::conf::load("/path/to/missing/superset.yaml").unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::PathNotFound(_))
    ));
}

#[test]
fn configure_rejects_invalid_conf() {
    let context = Context::fixture();
    let conf = ProviderConf::default();
    assert!(Provider::configure(&context, &conf).is_err());
}

#[test]
fn configure_valid_conf() {
    let context = Context::fixture();
    let conf = decode("host: http://superset-host\nusername: admin\npassword: admin\n");
    let provider = Provider::configure(&context, &conf).unwrap();
    let _ = provider.user_resource();
}
