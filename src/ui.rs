use crate::config::ChartProfile;
use crate::models::{Period, SourceKind};

pub fn render_index(
    svg: &str,
    source: SourceKind,
    max_scale: i64,
    profile: ChartProfile,
    periods: &[Period],
) -> String {
    let scored = periods
        .iter()
        .flat_map(|p| p.scored)
        .fold(0i64, i64::saturating_add);
    let conceded = periods
        .iter()
        .flat_map(|p| p.conceded)
        .fold(0i64, i64::saturating_add);
    let net = scored.saturating_sub(conceded);

    let source_label = match source {
        SourceKind::Store => "key-value store",
        SourceKind::Panel => "scoreboard panel",
        SourceKind::None => "no source (flat baseline)",
    };
    let profile_label = match profile {
        ChartProfile::Discrete => "discrete windows",
        ChartProfile::Smooth => "smoothed profile",
    };

    INDEX_HTML
        .replace("{{CHART}}", svg)
        .replace("{{SOURCE}}", source_label)
        .replace("{{PROFILE}}", profile_label)
        .replace("{{SCALE}}", &max_scale.to_string())
        .replace("{{SCORED}}", &scored.to_string())
        .replace("{{CONCEDED}}", &conceded.to_string())
        .replace("{{NET}}", &net.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Momentum Chart</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.net {
      color: var(--accent);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    #chart svg {
      width: 100%;
      height: auto;
      display: block;
    }

    button {
      justify-self: start;
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Momentum</h1>
      <p class="subtitle">Goals scored minus conceded per 5-minute bucket, over three periods.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Source</span>
        <span class="value">{{SOURCE}}</span>
      </div>
      <div class="stat">
        <span class="label">Profile</span>
        <span class="value">{{PROFILE}}</span>
      </div>
      <div class="stat">
        <span class="label">Scale</span>
        <span class="value">&plusmn;{{SCALE}}</span>
      </div>
      <div class="stat">
        <span class="label">Scored</span>
        <span class="value">{{SCORED}}</span>
      </div>
      <div class="stat">
        <span class="label">Conceded</span>
        <span class="value">{{CONCEDED}}</span>
      </div>
      <div class="stat">
        <span class="label">Net</span>
        <span class="value net">{{NET}}</span>
      </div>
    </section>

    <section class="chart-card">
      <div id="chart">{{CHART}}</div>
    </section>

    <button id="refresh" type="button">Refresh</button>
  </main>

  <script>
    const chartEl = document.getElementById('chart');

    const reload = async () => {
      const res = await fetch('/chart.svg');
      if (res.ok) {
        chartEl.innerHTML = await res.text();
      }
    };

    document.getElementById('refresh').addEventListener('click', reload);
    setInterval(reload, 5000);
  </script>
</body>
</html>
"#;
