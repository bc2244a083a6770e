// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each adapter translates between the domain `LLMProvider` interface and a
// concrete backend. Only the offline simulated backend ships today.

pub mod registry;
pub mod simulated;

pub use registry::ProviderRegistry;
pub use simulated::SimulatedProvider;
