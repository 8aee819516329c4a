//! Configuration options for Superset HTTP(S) clients.
use std::time::Duration;

/// Options to initialise clients with.
pub struct ClientOptions {
    /// Address of the Superset server to connect to, with trailing slash.
    pub address: String,

    /// Password to log in with.
    pub password: String,

    /// Timeout for requests made by the client.
    pub timeout: Duration,

    /// Timeout for new connections initialised by the client.
    pub timeout_connect: Duration,

    /// Username to log in with.
    pub username: String,
}

impl ClientOptions {
    /// Define options for API clients.
    pub fn url<S>(address: S) -> ClientOptionsBuilder
    where
        S: Into<String>,
    {
        ClientOptionsBuilder {
            address: address.into(),
            password: String::new(),
            timeout: Duration::from_secs(30),
            timeout_connect: Duration::from_secs(5),
            username: String::new(),
        }
    }
}

/// Incrementally build [`ClientOptions`] objects.
pub struct ClientOptionsBuilder {
    address: String,
    password: String,
    timeout: Duration,
    timeout_connect: Duration,
    username: String,
}

impl ClientOptionsBuilder {
    /// All options are set, get a usable options object.
    pub fn client(self) -> ClientOptions {
        self.into()
    }

    /// Set the credentials used to log in to the Superset API.
    pub fn credentials<S1, S2>(mut self, username: S1, password: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the timeout for requests made by the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for new connections initialised by the client.
    pub fn timeout_connect(mut self, timeout: Duration) -> Self {
        self.timeout_connect = timeout;
        self
    }
}

impl From<ClientOptionsBuilder> for ClientOptions {
    fn from(value: ClientOptionsBuilder) -> Self {
        let mut address = value.address;
        if !address.ends_with('/') {
            address.push('/');
        }
        ClientOptions {
            address,
            password: value.password,
            timeout: value.timeout,
            timeout_connect: value.timeout_connect,
            username: value.username,
        }
    }
}
