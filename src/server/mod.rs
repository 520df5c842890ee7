//! Connection handling: the accept loop, pooled handlers and listener
//! factories.

pub mod handler;
pub mod listener;
pub mod pool;
pub mod tls;

pub use handler::{BoundHandler, Handler, ServeOptions};
pub use listener::{ConnectionAcceptor, Listener, ListenerFactory, TcpListenerFactory};
pub use pool::HandlerPool;
pub use tls::TlsListenerFactory;
