//! Blueprint strings shared by the codec tests.

/// A five-entity blueprint exported by the game (version 2.0.15.4).
pub const EXAMPLE_STRING: &str = "0eNqNkttugzAMht/F10lVDqkWXmWaKg5eaw0MSwCtQnn3GZjopqFuV0kc/5//2JmgqAfsHHEP2QRUtuwhe57A04Xzeo5x3iBkkHuPTVETX3STl1di1AkEBcQVfkAWhRcFyD31hCthOdzOPDQFOklQD0kKutaLuOW5pgB1dDwejIKbbOM4PpgQ1C9ovEGLoX7TxB5dLxd7tOhOE7A4r8hhueY87bCTf7Ot/YnegaUbzOH7gF5AurzK+ofVyC5Wv0TnV6pF6edMv3pfe30fwl5xsxXvpPc0ou5cO1L1wMO3Jy0W5ulSj83cje3DKBjFzKIyp9im1po0PaaJOYXwCXGDw/Y=";

/// The JSON document inside [`EXAMPLE_STRING`].
pub const EXAMPLE_JSON: &str = r#"{"blueprint":{"icons":[{"signal":{"name":"assembling-machine-3"},"index":1}],"entities":[{"entity_number":1,"name":"assembling-machine-3","position":{"x":-100.5,"y":-222.5}},{"entity_number":2,"name":"bulk-inserter","position":{"x":-101.5,"y":-220.5},"direction":8},{"entity_number":3,"name":"bulk-inserter","position":{"x":-99.5,"y":-220.5}},{"entity_number":4,"name":"requester-chest","position":{"x":-101.5,"y":-219.5},"request_filters":{"sections":[{"index":1}]}},{"entity_number":5,"name":"passive-provider-chest","position":{"x":-99.5,"y":-219.5}}],"item":"blueprint","version":562949954404356}}"#;

/// [`EXAMPLE_STRING`] with a run of base64 characters replaced mid-stream.
/// The zlib header survives; the deflate data does not.
pub const CORRUPT_STRING: &str = "0eNqNkttugzAMht/F10lVDqkWXmWaKg5eaw0MSwCtQnn3GZjopqFuV0kc/5//2JmgqAfsHHEP2QRUtuwhe57A04Xzeo5aLuWowLookICorruptedItpgQ1C9ovEGLoX7TxB5dLxd7tOhOE7A4r8hhueY87bCTf7Ot/YnegaUbzOH7gF5AurzK+ofVyC5Wv0TnV6pF6edMv3pfe30fwl5xsxXvpPc0ou5cO1L1wMO3Jy0W5ulSj83cje3DKBjFzKIyp9im1po0PaaJOYXwCXGDw/Y=";
