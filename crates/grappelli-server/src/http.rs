use bytes::Bytes;
use grappelli_dispatch::Dispatcher;
use grappelli_http::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// HTTP/1.1 transport in front of a [`Dispatcher`].
///
/// Each accepted connection is served on its own task; the dispatcher is
/// shared behind an `Arc` and never locked.
pub struct HttpServer {
	dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
	pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
		Self { dispatcher }
	}

	/// Bind the address and accept connections until an accept error.
	///
	/// # Examples
	///
	/// ```no_run
	/// use std::net::SocketAddr;
	/// use std::sync::Arc;
	/// use grappelli_dispatch::{handler_fn, Dispatcher, Outcome};
	/// use grappelli_server::HttpServer;
	/// use grappelli_urls::RouteMethod;
	///
	/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
	/// let dispatcher = Dispatcher::builder()
	///     .route(
	///         RouteMethod::Get,
	///         "/mvc/hello",
	///         vec![],
	///         handler_fn(|_args| async { Ok(Outcome::view("hello")) }),
	///     )
	///     .build()?;
	///
	/// let addr: SocketAddr = "127.0.0.1:8000".parse()?;
	/// HttpServer::new(Arc::new(dispatcher)).listen(addr).await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn listen(self, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
		let listener = TcpListener::bind(addr).await?;
		tracing::info!("listening on http://{}", addr);

		loop {
			let (stream, remote_addr) = listener.accept().await?;
			let dispatcher = self.dispatcher.clone();

			tokio::task::spawn(async move {
				if let Err(err) = handle_connection(stream, remote_addr, dispatcher).await {
					tracing::warn!("connection from {} failed: {:?}", remote_addr, err);
				}
			});
		}
	}
}

async fn handle_connection(
	stream: TcpStream,
	remote_addr: SocketAddr,
	dispatcher: Arc<Dispatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
	let io = TokioIo::new(stream);
	let service = DispatchService {
		dispatcher,
		remote_addr,
	};

	http1::Builder::new().serve_connection(io, service).await?;

	Ok(())
}

/// Hyper service adapter: collects the body, hands the request to the
/// dispatcher, and converts the answer back.
struct DispatchService {
	dispatcher: Arc<Dispatcher>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for DispatchService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let dispatcher = self.dispatcher.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body = body.collect().await?.to_bytes();

			let method = parts.method.clone();
			let path = parts.uri.path().to_string();
			let request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body)
				.with_remote_addr(remote_addr);

			// dispatch() is infallible; every failure already became a
			// response inside the dispatcher.
			let started = std::time::Instant::now();
			let response = dispatcher.dispatch(request).await;
			tracing::info!(
				"{} {} - {} ({} ms)",
				method,
				path,
				response.status.as_u16(),
				started.elapsed().as_millis()
			);

			Ok(into_hyper_response(response)?)
		})
	}
}

fn into_hyper_response(
	response: Response,
) -> Result<hyper::Response<Full<Bytes>>, hyper::http::Error> {
	let mut builder = hyper::Response::builder().status(response.status);
	for (key, value) in response.headers.iter() {
		builder = builder.header(key, value);
	}
	builder.body(Full::new(response.body))
}

/// Create a server for the dispatcher and start listening.
///
/// # Examples
///
/// ```no_run
/// use std::net::SocketAddr;
/// use std::sync::Arc;
/// use grappelli_dispatch::{handler_fn, Dispatcher, Outcome};
/// use grappelli_server::serve;
/// use grappelli_urls::RouteMethod;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::builder()
///     .route(
///         RouteMethod::Get,
///         "/mvc/hello",
///         vec![],
///         handler_fn(|_args| async { Ok(Outcome::view("hello")) }),
///     )
///     .build()?;
///
/// let addr: SocketAddr = "127.0.0.1:8000".parse()?;
/// serve(addr, Arc::new(dispatcher)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(
	addr: SocketAddr,
	dispatcher: Arc<Dispatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
	HttpServer::new(dispatcher).listen(addr).await
}
