use xd_mtproto::{AuthSecret, EncryptedSession, Error, FutureSalt, SaltWindow, Side};

fn pair() -> (EncryptedSession, EncryptedSession) {
    // Non-uniform, so the two directions read different bytes.
    let bytes: [u8; 256] = std::array::from_fn(|i| i as u8);
    let client = AuthSecret::from_bytes(bytes);
    let id = client.derive_id();
    let client = EncryptedSession::new(client, id, Side::Client, 99).unwrap();
    let server = EncryptedSession::with_session_id(
        AuthSecret::from_bytes(bytes),
        id,
        Side::Server,
        client.session_id(),
        99,
    );
    (client, server)
}

#[test]
fn unpack_returns_exact_payload() {
    let (client, server) = pair();
    let wire = client.pack(b"exactly this").unwrap();
    assert_eq!(server.unpack(&wire).unwrap(), b"exactly this");

    let reply = server.pack(b"").unwrap();
    assert_eq!(client.unpack(&reply).unwrap(), b"");
}

#[test]
fn sessions_have_random_ids() {
    let secret = || AuthSecret::from_bytes([1; 256]);
    let a = EncryptedSession::new(secret(), [0; 8], Side::Client, 0).unwrap();
    let b = EncryptedSession::new(secret(), [0; 8], Side::Client, 0).unwrap();
    assert_ne!(a.session_id(), b.session_id());
    assert_eq!(a.side(), Side::Client);
    assert_eq!(a.secret_id(), [0; 8]);
}

#[test]
fn salt_change_is_applied_to_next_message() {
    let (mut client, server) = pair();
    client.salt = 4242;
    let wire = client.pack(b"new salt").unwrap();

    let window: SaltWindow = [FutureSalt { valid_since: 0, valid_until: 100, salt: 4242 }]
        .into_iter()
        .collect();
    assert_eq!(server.unpack_with_salts(&wire, &window, 50).unwrap(), b"new salt");

    client.salt = 1;
    let wire = client.pack(b"stale").unwrap();
    assert_eq!(server.unpack_with_salts(&wire, &window, 50), Err(Error::InvalidSalt { salt: 1 }));
}

#[test]
fn foreign_session_rejected() {
    let (client, _) = pair();
    let (_, other_server) = pair();
    let wire = client.pack(b"hi").unwrap();
    assert!(matches!(other_server.unpack(&wire), Err(Error::InvalidSession { .. })));
}

#[test]
fn session_debug_hides_secret() {
    let (client, _) = pair();
    let shown = format!("{client:?}");
    assert!(shown.contains("AuthSecret(len=256)"));
}

#[test]
fn own_packets_are_not_accepted_back() {
    let (client, server) = pair();

    let wire = client.pack(b"reflected").unwrap();
    let err = client.unpack(&wire).unwrap_err();
    assert!(
        matches!(err, Error::InvalidSession { .. } | Error::InvalidMessageKey),
        "{err:?}"
    );

    let wire = server.pack(b"reflected").unwrap();
    let err = server.unpack(&wire).unwrap_err();
    assert!(
        matches!(err, Error::InvalidSession { .. } | Error::InvalidMessageKey),
        "{err:?}"
    );
}
