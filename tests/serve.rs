use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use whisky_catalog::html::HtmlRenderer;
use whisky_catalog::report::Report;
use whisky_catalog::server;

const TABLE: &str = "\
Distillery,Body,Sweetness,Smoky,Medicinal,Tobacco,Honey,Spicy,Winey,Nutty,Malty,Fruity,Floral,Latitude,Longitude
Laphroig,4,2,4,4,1,0,0,1,1,1,0,0,138680,645160
Talisker,4,2,3,3,0,1,3,0,1,2,2,0,137560,829610";

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("send request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    response
}

#[tokio::test]
async fn serves_the_rendered_page_on_loopback() {
    let report = Report::from_reader(TABLE.as_bytes()).expect("pipeline succeeds");
    let html = HtmlRenderer::new("/plotly.js").render(report.page());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::serve_listener(listener, html.clone(), async {
        let _ = stopped.await;
    }));

    let response = get(addr, "/").await;
    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.to_ascii_lowercase().contains("content-type: text/html"));
    assert!(response.ends_with(&html));

    let missing = get(addr, "/missing").await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");

    let _ = stop.send(());
    handle
        .await
        .expect("server task")
        .expect("clean shutdown");
}
