// handlers/mod.rs - Two-tier handler architecture
//
// Public (no credential) → Protected (session cookie forwarded to the backend)
//
// The route guard runs in front of both tiers and only redirects pages; the
// API tiers answer 401 themselves through the `SessionToken` extractor.
pub mod public;    // Tier 1: login, logout, password recovery (/api/auth/*)
pub mod protected; // Tier 2: session required (/api/config-user, /api/user-numbers, /api/whatsapp/*)
