use std::collections::BTreeMap;
use std::ffi::OsString;

/// Process environment captured once at startup.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

impl Environment {
    pub fn capture() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut captured: Vec<(OsString, OsString)> = Vec::new();
        for (key, value) in vars {
            let key = key.into();
            let value = value.into();
            match captured.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => captured.push((key, value)),
            }
        }
        Environment { vars: captured }
    }

    /// Template bindings. Entries that are not valid UTF-8 are left out.
    pub fn bindings(&self) -> BTreeMap<String, String> {
        self.vars
            .iter()
            .filter_map(|(key, value)| Some((key.to_str()?.to_string(), value.to_str()?.to_string())))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter().map(|(key, value)| (key, value))
    }
}
