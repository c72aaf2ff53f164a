//! Dashboard artifact: a single self-contained HTML page with the report
//! model injected as JSON and rendered client-side per artist.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::model::IntelReport;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>K-Pop Intelligence</title>
<style>
  :root { --bg:#0f172a; --surface:#1e293b; --text:#f8fafc; --muted:#94a3b8;
          --accent:#ec4899; --border:rgba(255,255,255,0.1); }
  * { box-sizing:border-box; margin:0; padding:0; }
  body { font-family:system-ui,sans-serif; background:var(--bg); color:var(--text);
         max-width:960px; margin:0 auto; padding:24px; }
  header { display:flex; justify-content:space-between; align-items:center; margin-bottom:24px; }
  h1 { font-size:1.3rem; color:var(--accent); }
  select { background:var(--surface); color:var(--text); border:1px solid var(--border);
           border-radius:8px; padding:8px 12px; font-size:0.95rem; }
  .card { background:var(--surface); border:1px solid var(--border); border-radius:12px;
          padding:20px; margin-bottom:16px; }
  .badge { display:inline-block; font-size:0.75rem; padding:2px 10px; border-radius:99px;
           border:1px solid var(--accent); color:var(--accent); margin-left:8px; }
  table { width:100%; border-collapse:collapse; margin-top:10px; }
  th, td { text-align:left; padding:6px 10px; border-bottom:1px solid var(--border);
           font-size:0.9rem; }
  th { color:var(--muted); font-weight:600; }
  a { color:var(--text); }
  .muted { color:var(--muted); font-style:italic; padding:12px 0; }
  .best { color:var(--accent); font-weight:700; }
  .ticket-row { display:flex; gap:10px; margin-top:16px; flex-wrap:wrap; }
  .ticket-row a { display:inline-block; padding:8px 16px; border-radius:8px;
                  border:1px solid var(--border); text-decoration:none;
                  font-size:0.85rem; font-weight:600; }
  .ticket-row a:hover { border-color:var(--accent); color:var(--accent); }
</style>
</head>
<body>
<header>
  <h1>K-POP INTEL</h1>
  <select id="artist-select"></select>
</header>
<div id="content"></div>
<script>
const REPORT = __REPORT_JSON__;

const select = document.getElementById('artist-select');
const content = document.getElementById('content');

REPORT.artists.forEach((a, i) => {
  const opt = document.createElement('option');
  opt.value = i;
  opt.innerText = a.target.name + ' (' + a.target.category + ')';
  select.appendChild(opt);
});
select.addEventListener('change', e => render(REPORT.artists[e.target.value]));

function price(cents) { return '$' + (cents / 100).toFixed(2); }

const VENDOR_SEARCH = {
  'Ticketmaster': q => 'https://www.ticketmaster.com/search?q=' + q,
  'StubHub': q => 'https://www.stubhub.com/secure/search?q=' + q,
  'SeatGeek': q => 'https://seatgeek.com/search?search=' + q,
  'Vivid Seats': q => 'https://www.vividseats.com/search?searchTerm=' + q,
};

function vendorLink(vendor, artistName) {
  const build = VENDOR_SEARCH[vendor];
  const url = build
    ? build(encodeURIComponent(artistName))
    : 'https://www.google.com/search?q=' + encodeURIComponent(vendor + ' ' + artistName + ' tickets');
  return '<a href="' + url + '" target="_blank" rel="noopener">' + vendor + '</a>';
}

function minQuote(stop) {
  return stop.quotes.find(q => q.price_cents === stop.min_price_cents);
}

function ticketRow(artist) {
  if (artist.tour_stops.length === 0) return '';
  const vendors = artist.tour_stops[0].quotes.map(q => q.vendor);
  return '<div class="ticket-row">'
    + vendors.map(v => vendorLink(v, artist.target.name)).join('')
    + '</div>';
}

function render(artist) {
  if (!artist) { content.innerHTML = '<div class="muted">No artists in roster.</div>'; return; }
  const stops = artist.tour_stops.length === 0
    ? '<div class="muted">No confirmed tour stops.</div>'
    : '<table><tr><th>#</th><th>City</th><th>Date</th><th>Distance</th><th>Confirmations</th><th>Tickets from</th></tr>'
      + artist.tour_stops.map(s =>
          '<tr><td>' + s.rank + (s.best_value ? ' <span class="best">best value</span>' : '') + '</td>'
          + '<td>' + s.city_name + '</td>'
          + '<td>' + (s.date || 'TBA') + '</td>'
          + '<td>' + s.distance_km.toFixed(0) + ' km</td>'
          + '<td>' + s.confidence + '</td>'
          + '<td>' + price(s.min_price_cents) + ' via '
          + vendorLink(minQuote(s).vendor, artist.target.name) + '</td></tr>').join('')
      + '</table>';
  const news = artist.comeback_news.length === 0
    ? '<div class="muted">No recent comeback news.</div>'
    : '<table><tr><th>Source</th><th>Title</th></tr>'
      + artist.comeback_news.map(n =>
          '<tr><td>' + n.publisher + '</td><td><a href="' + n.link
          + '" target="_blank" rel="noopener">' + n.title + '</a></td></tr>').join('')
      + '</table>';
  content.innerHTML =
    '<div class="card"><strong>' + artist.target.name + '</strong>'
    + '<span class="badge">' + artist.target.category + '</span>'
    + '<h2 style="font-size:1rem;margin-top:14px;">Tour stops (from ' + REPORT.reference + ')</h2>'
    + stops
    + '<h2 style="font-size:1rem;margin-top:18px;">Comeback news</h2>'
    + news
    + ticketRow(artist) + '</div>';
}

render(REPORT.artists[0]);
</script>
</body>
</html>
"#;

pub fn write_dashboard(report: &IntelReport, path: &Path) -> Result<()> {
    fs::write(path, render(report)?).with_context(|| format!("writing {}", path.display()))
}

pub fn render(report: &IntelReport) -> Result<String> {
    let payload = super::json::to_json_string(report)?;
    // "</script>" inside a headline would otherwise terminate the block
    let payload = payload.replace("</", "<\\/");
    Ok(TEMPLATE.replace("__REPORT_JSON__", &payload))
}
