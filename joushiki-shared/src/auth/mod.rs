/// Authentication utilities
///
/// Credential storage is the only authentication concern in this system:
/// there are no tokens or sessions. The `password` module handles hashing
/// and verification of user passwords.

pub mod password;
