use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Honolulu, Hawaii Climate API</title>
    <style>
        body { text-align: center; font-family: sans-serif; }
        table { margin: 0 auto; width: 50%; border-collapse: collapse; }
        th, td { border: 1px solid black; padding: 8px; text-align: left; vertical-align: top; }
        th { background-color: #f2f2f2; }
    </style>
</head>
<body>
    <h1>Honolulu, Hawaii Climate API</h1>
    <h2>Available API routes</h2>
    <table>
        <tr><th>Description</th><th>Route</th></tr>
        <tr>
            <td>Precipitation for the last year of data</td>
            <td><a href="/api/v1.0/precipitation">/api/v1.0/precipitation</a></td>
        </tr>
        <tr>
            <td>Stations (flat list)</td>
            <td><a href="/api/v1.0/stations">/api/v1.0/stations</a></td>
        </tr>
        <tr>
            <td>Stations (one object per station)</td>
            <td><a href="/api/v1.0/stations/detail">/api/v1.0/stations/detail</a></td>
        </tr>
        <tr>
            <td>Stations ranked by number of measurements</td>
            <td><a href="/api/v1.0/stations/activity">/api/v1.0/stations/activity</a></td>
        </tr>
        <tr>
            <td>Temperature observations of the most active station, last year of data</td>
            <td><a href="/api/v1.0/tobs">/api/v1.0/tobs</a></td>
        </tr>
        <tr>
            <td>TMIN, TAVG and TMAX from a start date onwards</td>
            <td>/api/v1.0/&lt;start&gt;<br>(start as YYYY-MM-DD)</td>
        </tr>
        <tr>
            <td>TMIN, TAVG and TMAX between two dates, inclusive</td>
            <td>/api/v1.0/&lt;start&gt;/&lt;end&gt;<br>(start and end as YYYY-MM-DD)</td>
        </tr>
        <tr>
            <td>OpenAPI documentation</td>
            <td><a href="/swagger-ui/">/swagger-ui/</a></td>
        </tr>
    </table>
</body>
</html>
"#;

/// Human-readable list of the available routes.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
