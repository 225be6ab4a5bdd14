mod stripe_sig;

pub use stripe_sig::StripeSigMiddlewareFactory;
