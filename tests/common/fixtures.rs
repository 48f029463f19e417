//! Reusable deployment documents.

use serde_json::{json, Value};

/// base64 of `$USER1$/check_ping -H $HOSTADDRESS$ -w $ARG1$ -c $ARG2$`
pub const PING_LINE_B64: &str =
    "JFVTRVIxJC9jaGVja19waW5nIC1IICRIT1NUQUREUkVTUyQgLXcgJEFSRzEkIC1jICRBUkcyJA==";

/// Two discovered web hosts
pub fn web_hosts() -> Value {
    json!({
        "web01": {"address": "10.0.0.1"},
        "web02": {"address": "10.0.0.2"}
    })
}

/// A document with one host search pointing at `hosts_file`
pub fn document(hosts_file: &str) -> Value {
    json!({
        "miscsettings": {"aliastemplate": "%HOST% server"},
        "timeperiods": {
            "24x7": {
                "timeperiod_name": "24x7",
                "alias": "24 Hours",
                "times": {"t1": {"directive": "monday", "range": "00:00-24:00"}}
            }
        },
        "commands": {
            "check_ping": {"command_name": "check_ping", "command_line": PING_LINE_B64}
        },
        "hostsearches": {
            "web": {"location": "JsonFile", "srchparam": hosts_file}
        },
        "statichosts": {
            "lb": {"host_name": "lb01", "address": "10.0.1.1"}
        },
        "services": {
            "ping": {
                "service_description": "PING",
                "check_command": "check_ping",
                "carg1": "100",
                "carg2": "5"
            }
        },
        "nodetemplates": {"all": {"regex": ".*", "services": ["ping"]}}
    })
}
