use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Пишет в tracing (target `http`):
/// - Длительность (ms)
/// - Размер ответа (форматированный)
/// - Статус код
/// - Метод и путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                target: "http",
                "{:>5}ms | {:>12} | {} {:>6} {} ({})",
                start.elapsed().as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let size = format_size(bytes.len());
    let elapsed_ms = start.elapsed().as_millis();

    if parts.status.is_success() {
        tracing::info!(
            target: "http",
            "{:>5}ms | {:>12} | {} {:>6} {}",
            elapsed_ms,
            size,
            parts.status.as_u16(),
            method,
            uri.path()
        );
    } else {
        tracing::warn!(
            target: "http",
            "{:>5}ms | {:>12} | {} {:>6} {}",
            elapsed_ms,
            size,
            parts.status.as_u16(),
            method,
            uri.path()
        );
    }

    // Создаем новый ответ с прочитанным телом
    Response::from_parts(parts, Body::from(bytes))
}
