//! Wire types shared by the discovery core and the CLI.
//!
//! The companion language server exposes a Connect-style JSON API over
//! HTTPS on loopback. Only one call is modelled here: the unauthenticated
//! `GetUnleashData` route, used to confirm that a candidate port really
//! serves that API.

pub mod unleash;

pub use unleash::{
	CONNECT_PROTOCOL_VERSION, CONNECT_PROTOCOL_VERSION_HEADER, CSRF_TOKEN_HEADER, UNLEASH_ROUTE, UnleashContext, UnleashProperties,
	UnleashRequest, unleash_url,
};
