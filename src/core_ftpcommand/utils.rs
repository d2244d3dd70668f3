use chrono::{DateTime, Utc};

/// Timestamp reported for every node. The in-memory tree carries no real times.
pub fn placeholder_mtime() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Drops a leading option token such as `-la` from a LIST argument.
pub fn strip_list_options(arg: &str) -> &str {
    if arg.starts_with('-') {
        arg.split_once(' ').map_or("", |(_, rest)| rest)
    } else {
        arg
    }
}
