use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Now Playing</title>
</head>
<body>
  <h1>Now Playing</h1>
  <p><img src="/now-playing.svg" alt="Now playing on Spotify"></p>
  <ul>
    <li><a href="/now-playing.svg">/now-playing.svg</a> (dark, wide)</li>
    <li><a href="/now-playing.svg?theme=light">/now-playing.svg?theme=light</a></li>
    <li><a href="/now-playing.svg?size=compact">/now-playing.svg?size=compact</a></li>
    <li><a href="/now-playing.json">/now-playing.json</a></li>
    <li><a href="/login">/login</a> to obtain a refresh token</li>
  </ul>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
