use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::SourceOptions;
use crate::resources;
use crate::scanner::Scanner;
use crate::{Result, StdioError};

pub(crate) const STANDARD_INPUT: &str = "standard input";
pub(crate) const SCANNER: &str = "scanner";
pub(crate) const TEXT: &str = "text";

/// A buffered byte stream owned by exactly one reader.
pub type ByteStream = Box<dyn BufRead + Send>;

/// Everything an [`crate::In`] can be constructed from.
pub enum Source {
    StandardInput,
    /// A file opened by path.
    File(PathBuf),
    /// An already opened file handle.
    Handle(File),
    Socket(TcpStream),
    Url(Url),
    /// A symbolic name, resolved as a file, then as a registered resource,
    /// then as a URL.
    Name(String),
    /// A scanner created earlier; its unread input is adopted as is.
    Scanner(Scanner),
    /// In-memory text.
    Text(String),
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Source::Name(name.to_owned())
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Source::Name(name)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

impl From<File> for Source {
    fn from(file: File) -> Self {
        Source::Handle(file)
    }
}

impl From<TcpStream> for Source {
    fn from(socket: TcpStream) -> Self {
        Source::Socket(socket)
    }
}

impl From<Url> for Source {
    fn from(url: Url) -> Self {
        Source::Url(url)
    }
}

impl From<Scanner> for Source {
    fn from(scanner: Scanner) -> Self {
        Source::Scanner(scanner)
    }
}

impl Source {
    /// Human readable label used in error messages and logs.
    pub fn describe(&self) -> String {
        match self {
            Source::StandardInput => STANDARD_INPUT.to_owned(),
            Source::File(path) => path.display().to_string(),
            Source::Handle(_) => "file handle".to_owned(),
            Source::Socket(socket) => match socket.peer_addr() {
                Ok(addr) => format!("socket {}", addr),
                Err(_) => "socket".to_owned(),
            },
            Source::Url(url) => url.to_string(),
            Source::Name(name) => name.clone(),
            Source::Scanner(_) => SCANNER.to_owned(),
            Source::Text(_) => TEXT.to_owned(),
            Source::Reader(_) => "reader".to_owned(),
        }
    }

    /// Open the byte stream behind this source.
    ///
    /// A [`Source::Scanner`] already holds decoded text and cannot be turned
    /// back into a plain byte stream; [`crate::In`] adopts it directly.
    pub fn resolve(self, options: &SourceOptions) -> Result<ByteStream> {
        let capacity = options.buffer_capacity;
        match self {
            Source::StandardInput => {
                Ok(Box::new(BufReader::with_capacity(capacity, io::stdin())))
            }
            Source::File(path) => open_path(&path, capacity),
            Source::Handle(file) => {
                Ok(Box::new(BufReader::with_capacity(capacity, file)))
            }
            Source::Socket(socket) => {
                Ok(Box::new(BufReader::with_capacity(capacity, socket)))
            }
            Source::Url(url) => open_url(&url, options),
            Source::Name(name) => resolve_name(&name, options),
            Source::Scanner(_) => Err(StdioError::BadSource(
                "a scanner is adopted, not resolved".to_owned(),
            )),
            Source::Text(text) => Ok(Box::new(Cursor::new(text.into_bytes()))),
            Source::Reader(reader) => {
                Ok(Box::new(BufReader::with_capacity(capacity, reader)))
            }
        }
    }
}

fn open_path(path: &Path, capacity: usize) -> Result<ByteStream> {
    if path.as_os_str().is_empty() {
        return Err(StdioError::BadSource("empty file path".to_owned()));
    }
    let file = File::open(path).map_err(|e| {
        StdioError::BadSource(format!(
            "could not open {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(Box::new(BufReader::with_capacity(capacity, file)))
}

/// Try the filesystem, the resource registry and the network, in that order.
fn resolve_name(name: &str, options: &SourceOptions) -> Result<ByteStream> {
    if name.is_empty() {
        return Err(StdioError::BadSource("empty source name".to_owned()));
    }

    let path = Path::new(name);
    if path.exists() {
        log::debug!("resolving {} as a file", name);
        match open_path(path, options.buffer_capacity) {
            Ok(stream) => return Ok(stream),
            Err(e) => log::debug!("{}", e),
        }
    }

    if let Some(bytes) = resources::lookup(name) {
        log::debug!("resolving {} as a resource", name);
        return Ok(Box::new(Cursor::new(bytes)));
    }

    log::debug!("resolving {} as a URL", name);
    match Url::parse(name) {
        Ok(url) => open_url(&url, options).map_err(|e| {
            StdioError::BadSource(format!("could not open {}: {}", name, e))
        }),
        Err(e) => Err(StdioError::BadSource(format!(
            "could not open {}: not a file, resource or URL ({})",
            name, e
        ))),
    }
}

fn open_url(url: &Url, options: &SourceOptions) -> Result<ByteStream> {
    match url.scheme() {
        "file" => {
            let path = url.to_file_path().map_err(|_| {
                StdioError::BadSource(format!("not a local file URL: {}", url))
            })?;
            open_path(&path, options.buffer_capacity)
        }
        "http" | "https" => {
            let body = fetch(url, options)?;
            log::debug!("fetched {} bytes from {}", body.len(), url);
            Ok(Box::new(Cursor::new(body)))
        }
        scheme => Err(StdioError::BadSource(format!(
            "unsupported URL scheme {} in {}",
            scheme, url
        ))),
    }
}

fn fetch(url: &Url, options: &SourceOptions) -> Result<Vec<u8>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut builder =
            reqwest::Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.http_timeout {
            builder = builder.timeout(timeout);
        }
        if !options.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        let response = client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok::<_, StdioError>(body.to_vec())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::initialize;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tempdir::TempDir;

    /// Serve `body` to a single HTTP request on a local port.
    pub(crate) fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (Url, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut byte = [0u8; 1];
            while !request.ends_with(b"\r\n\r\n") {
                if stream.read(&mut byte).unwrap() == 0 {
                    break;
                }
                request.push(byte[0]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        let url = Url::parse(&format!("http://{}/foo", addr)).unwrap();
        (url, handle)
    }

    pub(crate) fn local_options() -> SourceOptions {
        SourceOptions::default().without_proxy()
    }

    fn read_to_string(mut stream: ByteStream) -> String {
        let mut text = String::new();
        stream.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn resolves_text() {
        let stream = Source::Text("hello".to_owned())
            .resolve(&SourceOptions::default())
            .unwrap();
        assert_eq!(read_to_string(stream), "hello");
    }

    #[test]
    fn resolves_file_path_and_handle() {
        initialize();
        let dir = TempDir::new("source").unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "from disk").unwrap();

        let stream = Source::File(path.clone())
            .resolve(&SourceOptions::default())
            .unwrap();
        assert_eq!(read_to_string(stream), "from disk");

        let handle = File::open(&path).unwrap();
        let stream = Source::from(handle)
            .resolve(&SourceOptions::default())
            .unwrap();
        assert_eq!(read_to_string(stream), "from disk");
    }

    #[test]
    fn missing_file_is_bad_source() {
        let dir = TempDir::new("source").unwrap();
        let err = Source::File(dir.path().join("absent"))
            .resolve(&SourceOptions::default())
            .err()
            .unwrap();
        assert!(err.is_bad_source());
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn empty_name_is_bad_source() {
        let err = Source::from("")
            .resolve(&SourceOptions::default())
            .err()
            .unwrap();
        assert!(err.is_bad_source());
    }

    #[test]
    fn unresolvable_name_is_named_in_error() {
        initialize();
        let err = Source::from("no-such-file-or-resource")
            .resolve(&SourceOptions::default())
            .err()
            .unwrap();
        assert!(err.is_bad_source());
        assert!(err.to_string().contains("no-such-file-or-resource"));
    }

    #[test]
    fn name_resolves_registered_resource() {
        resources::register("source-test/resource.txt", b"packaged");
        let stream = Source::from("source-test/resource.txt")
            .resolve(&SourceOptions::default())
            .unwrap();
        assert_eq!(read_to_string(stream), "packaged");
        resources::unregister("source-test/resource.txt");
    }

    #[test]
    fn name_resolves_url() {
        initialize();
        let (url, server) = serve_once("200 OK", "over the wire");
        let stream = Source::from(url.as_str())
            .resolve(&local_options())
            .unwrap();
        assert_eq!(read_to_string(stream), "over the wire");
        server.join().unwrap();
    }

    #[test]
    fn http_error_status_is_bad_source() {
        let (url, server) = serve_once("404 Not Found", "missing");
        let err = Source::Url(url).resolve(&local_options()).err().unwrap();
        assert!(err.is_bad_source());
        server.join().unwrap();
    }

    #[test]
    fn file_url() {
        let dir = TempDir::new("source").unwrap();
        let path = dir.path().join("local.txt");
        std::fs::write(&path, "local").unwrap();
        let url = Url::from_file_path(&path).unwrap();
        let stream = Source::Url(url)
            .resolve(&SourceOptions::default())
            .unwrap();
        assert_eq!(read_to_string(stream), "local");
    }

    #[test]
    fn unsupported_scheme() {
        let url = Url::parse("ftp://example.com/data").unwrap();
        let err = Source::Url(url)
            .resolve(&SourceOptions::default())
            .err()
            .unwrap();
        assert!(err.is_bad_source());
    }

    #[test]
    fn socket_source() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let writer = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.write_all(b"over tcp").unwrap();
        });
        let socket = TcpStream::connect(addr).unwrap();
        let source = Source::from(socket);
        assert!(source.describe().starts_with("socket"));
        let stream = source.resolve(&SourceOptions::default()).unwrap();
        writer.join().unwrap();
        assert_eq!(read_to_string(stream), "over tcp");
    }
}
