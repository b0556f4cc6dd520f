//! Embedded dashboard page.
//!
//! A single static HTML page driven by `fetch` against the JSON API, so
//! the service is usable without the separately deployed SPA. No
//! templating, no asset pipeline.

use axum::response::Html;

pub async fn dashboard() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Chimera tasks</title>
  <style>
    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    :root {
      --bg: #0e0e11; --surface: #17171c; --border: #26262f;
      --text: #e6e4e1; --text-2: #97959f; --accent: #5ba8f5;
      --green: #4ade80; --red: #f87171;
    }
    body { font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); font-size: 14px; line-height: 1.5; }
    header { padding: 12px 24px; background: var(--surface); border-bottom: 1px solid var(--border); display: flex; justify-content: space-between; align-items: center; }
    h1 { font-size: 16px; color: var(--accent); }
    main { max-width: 860px; margin: 0 auto; padding: 20px 24px; display: grid; gap: 16px; }
    section { background: var(--surface); border: 1px solid var(--border); border-radius: 8px; padding: 16px; }
    h2 { font-size: 12px; text-transform: uppercase; letter-spacing: 0.08em; color: var(--text-2); margin-bottom: 10px; }
    input { width: 100%; margin-bottom: 8px; padding: 7px 10px; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 5px; }
    button { padding: 6px 14px; background: var(--accent); color: #08131f; border: 0; border-radius: 5px; cursor: pointer; font-weight: 600; }
    button.ghost { background: none; color: var(--text-2); border: 1px solid var(--border); }
    ul { list-style: none; }
    li { display: flex; gap: 10px; align-items: center; padding: 7px 0; border-bottom: 1px solid var(--border); }
    li:last-child { border-bottom: 0; }
    li.done span.title { text-decoration: line-through; color: var(--text-2); }
    span.title { flex: 1; }
    span.due { color: var(--text-2); font-size: 12px; }
    #stats { color: var(--text-2); }
    #msg { font-size: 13px; margin-top: 6px; }
    #msg.ok { color: var(--green); }
    #msg.err { color: var(--red); }
    .row { display: flex; gap: 8px; }
    .row input { margin-bottom: 0; }
  </style>
</head>
<body>
  <header>
    <h1>chimera tasks</h1>
    <span id="stats"></span>
  </header>
  <main>
    <section>
      <h2>Settings</h2>
      <input id="token" type="password" placeholder="Personal access token">
      <input id="workspace" placeholder="Workspace ID">
      <input id="project" placeholder="Default project ID (optional)">
      <div class="row">
        <button onclick="saveSettings()">Save</button>
        <button class="ghost" onclick="testConnection()">Test connection</button>
      </div>
      <div id="msg"></div>
    </section>
    <section>
      <h2>New task</h2>
      <div class="row">
        <input id="new-name" placeholder="Task name">
        <input id="new-due" type="date">
        <button onclick="createTask()">Add</button>
      </div>
    </section>
    <section>
      <h2>My tasks</h2>
      <ul id="tasks"></ul>
    </section>
  </main>
  <script>
    const $ = (id) => document.getElementById(id);
    const api = async (path, options) => {
      const res = await fetch(path, options);
      const body = await res.json().catch(() => ({}));
      if (!res.ok) throw new Error(body.error || ('HTTP ' + res.status));
      return body;
    };
    const json = (method, body) => ({
      method, headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body)
    });
    const msg = (text, cls) => { $('msg').textContent = text; $('msg').className = cls; };

    async function loadSettings() {
      const s = await api('/api/settings');
      $('token').value = s.asanaToken;
      $('workspace').value = s.asanaWorkspace;
      $('project').value = s.asanaProject;
    }
    async function saveSettings() {
      await api('/api/settings', json('POST', {
        asanaToken: $('token').value,
        asanaWorkspace: $('workspace').value,
        asanaProject: $('project').value,
      }));
      msg('Saved.', 'ok');
      refresh();
    }
    async function testConnection() {
      try {
        const r = await api('/api/asana/test', json('POST', { asanaToken: $('token').value }));
        msg('Connected as ' + r.user, 'ok');
      } catch (e) {
        msg(e.message, 'err');
      }
    }
    async function createTask() {
      if (!$('new-name').value) return;
      await api('/api/tasks', json('POST', {
        name: $('new-name').value,
        due_on: $('new-due').value || undefined,
      }));
      $('new-name').value = '';
      refresh();
    }
    async function completeTask(id) { await api('/api/tasks/' + id + '/complete', { method: 'PUT' }); refresh(); }
    async function deleteTask(id) { await api('/api/tasks/' + id, { method: 'DELETE' }); refresh(); }

    async function refresh() {
      const [tasks, stats] = await Promise.all([api('/api/tasks'), api('/api/tasks/stats')]);
      $('stats').textContent = stats.active + ' active / ' + stats.completed + ' done';
      const list = $('tasks');
      list.innerHTML = '';
      for (const t of tasks) {
        const li = document.createElement('li');
        li.className = t.completed ? 'done' : '';
        const title = document.createElement('span');
        title.className = 'title';
        title.textContent = t.name;
        li.appendChild(title);
        if (t.due_on) {
          const due = document.createElement('span');
          due.className = 'due';
          due.textContent = t.due_on;
          li.appendChild(due);
        }
        if (!t.completed) {
          const done = document.createElement('button');
          done.className = 'ghost';
          done.textContent = 'done';
          done.onclick = () => completeTask(t.gid);
          li.appendChild(done);
        }
        const del = document.createElement('button');
        del.className = 'ghost';
        del.textContent = 'x';
        del.onclick = () => deleteTask(t.gid);
        li.appendChild(del);
        list.appendChild(li);
      }
    }

    loadSettings().then(refresh).catch((e) => msg(e.message, 'err'));
    setInterval(() => refresh().catch(() => {}), 30000);
  </script>
</body>
</html>"#,
    )
}
