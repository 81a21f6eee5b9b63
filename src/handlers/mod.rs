// Handlers are split by security tier:
// public (no credentials) and protected (bearer token via the auth guard).
pub mod protected;
pub mod public;
