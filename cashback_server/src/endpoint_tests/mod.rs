mod businesses;
mod mocks;
mod stats;
mod webhook;
