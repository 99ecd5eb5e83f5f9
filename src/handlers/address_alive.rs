//! `address_alive` placeholder - TCP liveness probe

use crate::placeholder::{HandlerId, Invocation, Placeholder};
use std::any::Any;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Substitutes one of two caller-supplied texts depending on whether a TCP
/// connection to `host,port` succeeds within 500 ms.
///
/// `<address_alive(127.0.0.1,4000,yes,no)>` becomes `yes` when the port
/// accepts a connection, `no` otherwise. Fewer than four arguments or an
/// unparseable port echoes the origin.
pub struct AddressAlivePlaceholder;

impl AddressAlivePlaceholder {
    /// Registry identity for this handler type.
    pub const ID: HandlerId = HandlerId("address_alive");
}

impl Placeholder for AddressAlivePlaceholder {
    fn identity(&self) -> HandlerId {
        Self::ID
    }

    fn tag(&self) -> &str {
        "address_alive"
    }

    fn parse(&self, _context: Option<&dyn Any>, invocation: &Invocation<'_>) -> String {
        let arguments = &invocation.arguments;
        if arguments.len() < 4 {
            return invocation.origin.to_string();
        }

        // 0 = host, 1 = port, 2 = alive text, 3 = dead text
        let Ok(port) = arguments[1].parse::<u16>() else {
            return invocation.origin.to_string();
        };
        if probe(&arguments[0], port) {
            arguments[2].clone()
        } else {
            arguments[3].clone()
        }
    }
}

fn probe(host: &str, port: u16) -> bool {
    let Ok(mut addresses) = (host, port).to_socket_addrs() else {
        return false;
    };
    addresses
        .next()
        .is_some_and(|address| TcpStream::connect_timeout(&address, CONNECT_TIMEOUT).is_ok())
}
