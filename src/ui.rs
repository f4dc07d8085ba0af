use rand::seq::SliceRandom;

pub const REFLECTION_PROMPTS: [&str; 6] = [
    "This week: what is one thing you want to remember?",
    "Is there a week ahead you have been postponing for too long?",
    "Which past week are you most grateful for?",
    "What would you like to accomplish in the next 52 weeks?",
    "How do you want to spend your next 100 weeks?",
    "What patterns do you notice in how you have spent your time?",
];

pub fn pick_reflection() -> &'static str {
    REFLECTION_PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(REFLECTION_PROMPTS[0])
}

pub fn render_index(dark_mode: bool, reflection: &str) -> String {
    let theme = if dark_mode { "dark" } else { "light" };
    INDEX_HTML
        .replace("{{THEME}}", theme)
        .replace("{{REFLECTION}}", reflection)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Life in Weeks</title>
  <style>
    :root {
      --bg: #ffffff;
      --card: #f4f4f5;
      --ink: #09090b;
      --muted: #52525b;
      --border: #e4e4e7;
      --lived: #09090b;
      --unlived: #e4e4e7;
      --mark: #3b82f6;
    }

    body.dark {
      --bg: #000000;
      --card: #18181b;
      --ink: #ffffff;
      --muted: #a1a1aa;
      --border: #27272a;
      --lived: #ffffff;
      --unlived: #27272a;
      --mark: #60a5fa;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Helvetica Neue", sans-serif;
      transition: background 300ms ease, color 300ms ease;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 16px 32px;
    }

    header h1 {
      font-size: 1.25rem;
      margin: 0;
    }

    main {
      max-width: 1024px;
      margin: 0 auto;
      padding: 16px 32px 64px;
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 28px;
    }

    .card h2,
    .card h3 {
      margin: 0 0 16px;
    }

    .muted {
      color: var(--muted);
    }

    button,
    input,
    textarea {
      font: inherit;
      color: inherit;
    }

    button {
      background: transparent;
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 8px 16px;
      cursor: pointer;
    }

    button.active,
    button.primary {
      background: var(--ink);
      color: var(--bg);
    }

    input,
    textarea {
      background: var(--bg);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 10px 12px;
    }

    .choices {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      margin: 12px 0;
    }

    .grid-row {
      display: grid;
      grid-template-columns: 110px repeat(var(--per-row), minmax(0, 1fr));
      gap: 2px;
      margin-bottom: 2px;
      align-items: center;
    }

    .chapter {
      font-size: 10px;
      text-transform: uppercase;
      letter-spacing: 0.06em;
      color: var(--muted);
      text-align: right;
      padding-right: 8px;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 1px;
      background: var(--unlived);
      cursor: pointer;
    }

    .cell.lived {
      background: var(--lived);
    }

    .cell.marked {
      box-shadow: 0 0 0 1px var(--mark);
    }

    .events li {
      border-left: 2px solid var(--border);
      padding: 6px 12px;
      margin-bottom: 10px;
      list-style: none;
    }

    .chat-log {
      max-height: 320px;
      overflow-y: auto;
      display: grid;
      gap: 8px;
      margin-bottom: 12px;
    }

    .chat-log .user {
      text-align: right;
    }

    .chat-log p {
      margin: 0;
      white-space: pre-wrap;
    }

    dialog {
      background: var(--card);
      color: var(--ink);
      border: 1px solid var(--border);
      border-radius: 16px;
      width: min(480px, 90vw);
    }

    dialog textarea {
      width: 100%;
      min-height: 120px;
    }

    .hidden {
      display: none;
    }
  </style>
</head>
<body class="{{THEME}}">
  <header>
    <h1>Memento Mori</h1>
    <div>
      <button id="key-button" title="Generative API key">Key</button>
      <button id="theme-toggle" title="Toggle dark mode">Theme</button>
    </div>
  </header>
  <main>
    <section class="card" id="setup">
      <h2>Your life in weeks</h2>
      <p class="muted">{{REFLECTION}}</p>
      <label for="birth">Birth date and time</label><br />
      <input id="birth" type="datetime-local" />
      <div class="choices" id="expectancy-choices">
        <button data-years="70">70 years</button>
        <button data-years="80" class="active">80 years</button>
        <button data-years="90">90 years</button>
        <button data-years="custom">Custom</button>
      </div>
      <input id="custom-expectancy" class="hidden" type="number" min="1" max="150" placeholder="Years" />
      <div class="choices">
        <button id="submit" class="primary">Show my weeks</button>
      </div>
      <p id="status" class="muted"></p>
    </section>

    <section class="card hidden" id="summary">
      <h2>You are precisely</h2>
      <p id="age" class="muted"></p>
      <p id="progress" class="muted"></p>
    </section>

    <section class="card hidden" id="grid-card">
      <div class="choices" id="view-choices">
        <button data-view="weeks" class="active">Weeks</button>
        <button data-view="months">Months</button>
        <button data-view="years">Years</button>
      </div>
      <div id="grid"></div>
    </section>

    <div id="stat-cards"></div>

    <section class="card hidden" id="events-card">
      <h3>Major events in your lifetime</h3>
      <ul class="events" id="events"></ul>
      <div id="events-empty" class="hidden">
        <p class="muted">Unable to load major events. Please check your API key.</p>
        <button id="events-retry">Retry</button>
      </div>
    </section>

    <section class="card hidden" id="chat-card">
      <h3>Ask about your time</h3>
      <div class="chat-log" id="chat-log"></div>
      <form id="chat-form" class="choices">
        <input id="chat-question" placeholder="What would you like to reflect on?" style="flex: 1" />
        <button class="primary" type="submit">Send</button>
      </form>
    </section>
  </main>

  <dialog id="note-dialog">
    <h3 id="note-title"></h3>
    <p id="note-date" class="muted"></p>
    <textarea id="note-text" placeholder="What happened this week?"></textarea>
    <div class="choices">
      <button id="note-save" class="primary">Save</button>
      <button id="note-cancel">Cancel</button>
    </div>
  </dialog>

  <dialog id="key-dialog">
    <h3>Generative API key</h3>
    <p class="muted">Stored on this server only. Used for chat and major events.</p>
    <input id="key-input" type="password" style="width: 100%" />
    <div class="choices">
      <button id="key-save" class="primary">Save</button>
      <button id="key-clear">Forget key</button>
      <button id="key-cancel">Cancel</button>
    </div>
  </dialog>

  <script>
    const byId = (id) => document.getElementById(id);
    const fmt = (value) => Number(value).toLocaleString('en-US');
    const plural = (n, unit) => `${n} ${n === 1 ? unit : unit + 's'}`;

    let expectancyChoice = '80';
    let view = 'weeks';
    let current = null;
    let selectedWeek = null;

    const request = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['Content-Type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const response = await fetch(url, options);
      if (!response.ok) {
        throw new Error(await response.text());
      }
      return response.json();
    };

    const lifeQuery = () => `birth=${encodeURIComponent(current.birth)}&expectancy=${current.expectancy}`;

    const selectedExpectancy = () => {
      if (expectancyChoice === 'custom') {
        return parseInt(byId('custom-expectancy').value, 10);
      }
      return parseInt(expectancyChoice, 10);
    };

    const renderSummary = (stats) => {
      const age = stats.age;
      byId('age').textContent = `${plural(age.years, 'year')}, ${plural(age.months, 'month')}, ` +
        `${plural(age.days, 'day')}, ${plural(age.hours, 'hour')}, ${plural(age.minutes, 'minute')}, ` +
        `and ${plural(age.seconds, 'second')} old`;
      byId('progress').textContent = `${fmt(stats.weeks_lived)} of ${fmt(stats.total_weeks)} weeks lived ` +
        `(${stats.percentage_lived}%), ${fmt(stats.weeks_remaining)} remaining.`;
      byId('summary').classList.remove('hidden');
    };

    const renderStatCards = (stats) => {
      const sections = [
        ['Life highlights', [
          `That's ${fmt(stats.days_lived)} days of experience and approximately ${stats.seasons} seasons observed.`,
          `Your heart has beaten approximately ${fmt(stats.heart_beats)} times.`,
          `You've taken around ${fmt(stats.breaths)} breaths and slept about ${fmt(stats.sleep_hours)} hours.`,
        ]],
        ['Societal context', [
          `During your lifetime, humanity's population has grown from approximately ${(stats.world_pop_at_birth / 1e9).toFixed(1)} billion to over ${(stats.current_world_pop / 1e9).toFixed(1)} billion people.`,
          `The average person will meet around 80,000 people in their lifetime. You've likely already met approximately ${fmt(stats.people_met)} individuals.`,
          `Since your birth, humanity has collectively experienced approximately ${fmt(stats.total_births)} births and ${fmt(stats.total_deaths)} deaths.`,
        ]],
        ['Cosmic perspective', [
          `Since your birth, Earth has traveled approximately ${fmt(stats.distance_around_sun_km)} kilometers around the Sun.`,
          `Your entire lifespan is just ${stats.lifespan_percent}% of the universe's age.`,
          `During your lifetime, our solar system has moved about ${fmt(stats.distance_through_galaxy_km)} kilometers through the Milky Way.`,
        ]],
        ['Natural world', [
          `You've experienced approximately ${stats.lunar_cycles} lunar cycles and ${stats.trips_around_sun} trips around the Sun.`,
          `A giant sequoia can live over 3,000 years. Your current age is ${stats.sequoia_percent}% of its potential lifespan.`,
        ]],
      ];
      const container = byId('stat-cards');
      container.replaceChildren();
      for (const [title, lines] of sections) {
        const card = document.createElement('section');
        card.className = 'card';
        const heading = document.createElement('h3');
        heading.textContent = title;
        card.appendChild(heading);
        for (const line of lines) {
          const p = document.createElement('p');
          p.className = 'muted';
          p.textContent = line;
          card.appendChild(p);
        }
        container.appendChild(card);
      }
      const footer = document.createElement('p');
      footer.className = 'muted';
      footer.textContent = `Based on your planning number of ${stats.life_expectancy} years (${fmt(stats.total_weeks)} weeks)`;
      container.appendChild(footer);
    };

    const loadGrid = async () => {
      const grid = await request('GET', `/api/grid?${lifeQuery()}&view=${view}`);
      const container = byId('grid');
      container.replaceChildren();
      container.style.setProperty('--per-row', grid.items_per_row);
      for (const row of grid.rows) {
        const rowEl = document.createElement('div');
        rowEl.className = 'grid-row';
        const label = document.createElement('div');
        label.className = 'chapter';
        label.textContent = row.chapter || '';
        rowEl.appendChild(label);
        for (const cell of row.cells) {
          const cellEl = document.createElement('div');
          cellEl.className = 'cell' + (cell.lived ? ' lived' : '') + (cell.marked ? ' marked' : '');
          cellEl.title = cell.title;
          if (grid.view === 'weeks') {
            cellEl.addEventListener('click', () => openNote(cell.index));
          }
          rowEl.appendChild(cellEl);
        }
        container.appendChild(rowEl);
      }
      byId('grid-card').classList.remove('hidden');
    };

    const loadEvents = async () => {
      const list = byId('events');
      list.replaceChildren();
      byId('events-empty').classList.add('hidden');
      let events = [];
      try {
        events = (await request('POST', '/api/events', current)).events;
      } catch (err) {
        events = [];
      }
      for (const event of events) {
        const item = document.createElement('li');
        const title = document.createElement('strong');
        title.textContent = `${event.year} · ${event.title}`;
        const description = document.createElement('p');
        description.className = 'muted';
        description.textContent = event.description;
        item.append(title, description);
        list.appendChild(item);
      }
      if (events.length === 0) {
        byId('events-empty').classList.remove('hidden');
      }
    };

    const refreshPreferences = async () => {
      const prefs = await request('GET', '/api/preferences');
      document.body.className = prefs.dark_mode ? 'dark' : 'light';
      byId('events-card').classList.toggle('hidden', !(prefs.has_api_key && current));
      return prefs;
    };

    const submit = async () => {
      const birth = byId('birth').value;
      const expectancy = selectedExpectancy();
      if (!birth || !expectancy) {
        byId('status').textContent = 'Enter a birth date and a planning number of years.';
        return;
      }
      try {
        const stats = await request('POST', '/api/life', { birth, expectancy });
        current = { birth, expectancy };
        byId('status').textContent = '';
        renderSummary(stats);
        renderStatCards(stats);
        byId('chat-card').classList.remove('hidden');
        await loadGrid();
        const prefs = await refreshPreferences();
        if (prefs.has_api_key) {
          loadEvents();
        }
      } catch (err) {
        byId('status').textContent = err.message;
      }
    };

    const openNote = async (week) => {
      selectedWeek = week;
      const note = await request('GET', `/api/notes/${week}?birth=${encodeURIComponent(current.birth)}`);
      byId('note-title').textContent = `Week ${week + 1}`;
      byId('note-date').textContent = note.starts_on ? `Starting ${new Date(note.starts_on).toDateString()}` : '';
      byId('note-text').value = note.note;
      byId('note-dialog').showModal();
    };

    const appendChat = (role, content) => {
      const p = document.createElement('p');
      p.className = role;
      p.textContent = content;
      byId('chat-log').appendChild(p);
      byId('chat-log').scrollTop = byId('chat-log').scrollHeight;
    };

    byId('expectancy-choices').addEventListener('click', (event) => {
      const years = event.target.dataset.years;
      if (!years) return;
      expectancyChoice = years;
      for (const button of byId('expectancy-choices').querySelectorAll('button')) {
        button.classList.toggle('active', button.dataset.years === years);
      }
      byId('custom-expectancy').classList.toggle('hidden', years !== 'custom');
    });

    byId('view-choices').addEventListener('click', (event) => {
      const next = event.target.dataset.view;
      if (!next || !current) return;
      view = next;
      for (const button of byId('view-choices').querySelectorAll('button')) {
        button.classList.toggle('active', button.dataset.view === next);
      }
      loadGrid();
    });

    byId('submit').addEventListener('click', submit);
    byId('events-retry').addEventListener('click', loadEvents);

    byId('theme-toggle').addEventListener('click', async () => {
      const prefs = await request('POST', '/api/preferences/dark-mode');
      document.body.className = prefs.dark_mode ? 'dark' : 'light';
    });

    byId('note-save').addEventListener('click', async () => {
      await request('PUT', `/api/notes/${selectedWeek}`, { note: byId('note-text').value });
      byId('note-dialog').close();
      await loadGrid();
    });
    byId('note-cancel').addEventListener('click', () => byId('note-dialog').close());

    byId('key-button').addEventListener('click', () => byId('key-dialog').showModal());
    byId('key-cancel').addEventListener('click', () => byId('key-dialog').close());
    byId('key-save').addEventListener('click', async () => {
      const apiKey = byId('key-input').value.trim();
      if (!apiKey) return;
      await request('PUT', '/api/key', { api_key: apiKey });
      byId('key-input').value = '';
      byId('key-dialog').close();
      const prefs = await refreshPreferences();
      if (prefs.has_api_key && current) {
        loadEvents();
      }
    });
    byId('key-clear').addEventListener('click', async () => {
      await request('DELETE', '/api/key');
      byId('key-dialog').close();
      await refreshPreferences();
    });

    byId('chat-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const question = byId('chat-question').value.trim();
      if (!question) return;
      appendChat('user', question);
      byId('chat-question').value = '';
      try {
        const reply = await request('POST', '/api/chat', { question, ...(current || {}) });
        appendChat('assistant', reply.content);
      } catch (err) {
        if (err.message === 'API key required') {
          byId('key-dialog').showModal();
        } else {
          appendChat('assistant', `Error: ${err.message}`);
        }
      }
    });

    refreshPreferences().catch(() => {});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_theme_and_reflection() {
        let html = render_index(true, REFLECTION_PROMPTS[2]);
        assert!(html.contains(r#"<body class="dark">"#));
        assert!(html.contains("Which past week are you most grateful for?"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn reflection_comes_from_the_list() {
        for _ in 0..20 {
            assert!(REFLECTION_PROMPTS.contains(&pick_reflection()));
        }
    }
}
