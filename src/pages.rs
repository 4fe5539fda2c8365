//! Embedded HTML pages.

use axum::http::StatusCode;

use crate::analysis::AnalysisReport;

/// Upload form served at the root route.
pub const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CSV Upload</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            background-color: #f4f4f9;
        }
        .container {
            width: 100%;
            max-width: 500px;
            background: #fff;
            padding: 30px;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
            border-radius: 10px;
        }
        h1 {
            font-size: 24px;
            text-align: center;
            margin-bottom: 20px;
        }
        form {
            display: flex;
            flex-direction: column;
            align-items: center;
        }
        input[type="file"] {
            margin-bottom: 20px;
        }
        input[type="submit"] {
            background-color: #4CAF50;
            color: white;
            padding: 10px 20px;
            border: none;
            border-radius: 5px;
            cursor: pointer;
        }
        input[type="submit"]:hover {
            background-color: #45a049;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Upload CSV File</h1>
        <form action="/upload_csv/" enctype="multipart/form-data" method="post">
            <input type="file" name="file" accept=".csv" required>
            <input type="submit" value="Upload and Process">
        </form>
    </div>
</body>
</html>
"#;

/// Result page for a finished analysis.
pub fn result_page(report: &AnalysisReport, plot_href: &str) -> String {
    let mut ranking_rows = String::new();
    for (model, scores) in &report.rankings {
        ranking_rows.push_str(&format!(
            "            <tr><td>{}</td><td>{:.4}</td><td>{:.4}</td></tr>\n",
            escape(&model.to_string()),
            scores.r2,
            scores.rmse,
        ));
    }

    let body = format!(
        r#"        <h1>CSV Processing Result</h1>
        <p>Best model: <strong>{best}</strong></p>
        <p>R&sup2; {r2:.4} &middot; RMSE {rmse:.4} on {n} samples</p>
        <p>Selected features: {features} &rarr; {target}</p>
        <table>
            <tr><th>Model</th><th>R&sup2;</th><th>RMSE</th></tr>
{ranking_rows}        </table>
        <img src="{plot_href}" alt="Actual vs predicted values on the held-out split">
        <p><a href="/">Upload another file</a></p>"#,
        best = escape(&report.best.to_string()),
        r2 = report.best_scores.r2,
        rmse = report.best_scores.rmse,
        n = report.n_samples,
        features = escape(&report.selected_features.join(", ")),
        target = escape(&report.target),
    );
    page("CSV Upload Result", &body)
}

/// Minimal error page; the message has already been sanitized of internals
/// by the error mapping.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        r#"        <h1>Upload failed</h1>
        <p>{}</p>
        <p><a href="/">Back to the upload form</a></p>"#,
        escape(message),
    );
    page(&title, &body)
}

/// Shared page shell for the result and error pages.
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            background-color: #f4f4f9;
        }}
        .container {{
            width: 100%;
            max-width: 640px;
            background: #fff;
            padding: 30px;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
            border-radius: 10px;
        }}
        h1 {{
            font-size: 24px;
            text-align: center;
            margin-bottom: 20px;
        }}
        p {{
            font-size: 16px;
            text-align: center;
            color: #333;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            margin: 16px 0;
        }}
        th, td {{
            padding: 6px 10px;
            border-bottom: 1px solid #ddd;
            text-align: left;
            font-size: 14px;
        }}
        img {{
            display: block;
            margin: 16px auto;
            max-width: 100%;
        }}
        a {{
            color: #4CAF50;
        }}
    </style>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Uploaded CSVs control header names, so everything user-derived is escaped
/// before it lands in markup.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<img src="x" & more>"#),
            "&lt;img src=&quot;x&quot; &amp; more&gt;"
        );
    }

    #[test]
    fn upload_page_posts_a_file_field() {
        assert!(UPLOAD_PAGE.contains(r#"action="/upload_csv/""#));
        assert!(UPLOAD_PAGE.contains(r#"type="file""#));
        assert!(UPLOAD_PAGE.contains(r#"name="file""#));
    }

    #[test]
    fn error_page_carries_status_and_message() {
        let html = error_page(StatusCode::BAD_REQUEST, "file is not valid UTF-8");
        assert!(html.contains("400 Bad Request"));
        assert!(html.contains("file is not valid UTF-8"));
    }
}
