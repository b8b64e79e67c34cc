//! Page CSS styles
//!
//! One stylesheet for every page, themed through the `--sim-*` custom
//! properties. Only classes emitted by the renderers are styled.

pub const STYLES: &str = r"
:root {
    --sim-page: #10141a;
    --sim-panel: #181e27;
    --sim-line: #2b3442;
    --sim-ink: #d7dde6;
    --sim-muted: #8893a4;
    --sim-accent: #4fa3f7;
    --sim-gain: #34c77b;
    --sim-loss: #ef5b5b;
    --sim-caution: #e0a43a;
    --sim-radius: 10px;
}

*, *::before, *::after { box-sizing: border-box; }

body {
    margin: 0;
    padding: 24px 16px;
    background: var(--sim-page);
    color: var(--sim-ink);
    font: 14px/1.5 system-ui, 'Helvetica Neue', Arial, sans-serif;
}

.container { width: min(1180px, 100%); margin-inline: auto; }

/* Navigation bar */
header {
    display: flex;
    flex-wrap: wrap;
    align-items: baseline;
    gap: 8px 24px;
    padding-bottom: 12px;
    margin-bottom: 20px;
    border-bottom: 1px solid var(--sim-line);
}
header h1 { margin: 0; font-size: 22px; font-weight: 600; }
.header-controls { display: flex; flex-wrap: wrap; gap: 4px 16px; }
.nav-link { color: var(--sim-muted); text-decoration: none; }
.nav-link:hover { color: var(--sim-ink); }
.nav-link.active { color: var(--sim-accent); font-weight: 600; }

/* Page layout */
.grid { display: grid; gap: 20px; grid-template-columns: repeat(auto-fill, minmax(340px, 1fr)); }
.card {
    padding: 16px 18px;
    background: var(--sim-panel);
    border: 1px solid var(--sim-line);
    border-radius: var(--sim-radius);
    overflow-x: auto;
}
.card.wide { grid-column: 1 / -1; }
.card-header { display: flex; align-items: baseline; justify-content: space-between; gap: 12px; }
.card-title { font-weight: 600; letter-spacing: 0.02em; }
.card-value { font-size: 26px; font-variant-numeric: tabular-nums; }
.empty { margin: 12px 0; color: var(--sim-muted); font-style: italic; }
.text-center { text-align: center; }
.my-5 { margin-block: 3rem; }
.chart { min-height: 340px; }

/* Record tables */
.data-table { width: 100%; border-collapse: collapse; margin-top: 10px; }
.data-table th { color: var(--sim-muted); font-weight: 500; text-align: left; white-space: nowrap; }
.data-table th, .data-table td { padding: 8px 10px; border-bottom: 1px solid var(--sim-line); }
.data-table tbody tr:nth-child(even) { background: rgba(255, 255, 255, 0.02); }
.data-table th[data-sortable] { cursor: pointer; user-select: none; }
.data-table th[data-order='asc']::after { content: ' \25B2'; }
.data-table th[data-order='desc']::after { content: ' \25BC'; }
.data-table .num { text-align: right; font-variant-numeric: tabular-nums; }
.data-table .row-index { width: 3em; color: var(--sim-muted); }

/* Flash messages */
#alertMessage {
    position: fixed;
    z-index: 30;
    top: 12px;
    left: 50%;
    transform: translateX(-50%);
    width: min(440px, calc(100% - 24px));
}
.alert {
    display: flex;
    align-items: flex-start;
    justify-content: space-between;
    margin-bottom: 6px;
    padding: 10px 14px;
    border-left: 4px solid currentColor;
    border-radius: 6px;
    background: var(--sim-panel);
}
.alert.fade { transition: opacity 0.25s ease-out; }
.alert.fade:not(.show) { opacity: 0; }
.alert-danger { color: var(--sim-loss); }
.alert-warning { color: var(--sim-caution); }
.alert-success { color: var(--sim-gain); }
.alert-info { color: var(--sim-accent); }
.btn-close { padding: 0 0 0 12px; border: 0; background: none; color: inherit; cursor: pointer; }
.btn-close::before { content: '\00D7'; font-size: 18px; line-height: 1; }

/* Buttons */
.btn { padding: 7px 14px; border: 0; border-radius: 6px; font: inherit; cursor: pointer; }
.btn-primary { background: var(--sim-accent); color: #0b1320; }
.btn-secondary { background: var(--sim-line); color: var(--sim-ink); }
.btn:hover { filter: brightness(1.1); }

/* Confirmation and action popups */
.modal {
    display: none;
    position: fixed;
    z-index: 20;
    inset: 0;
    place-items: center;
    background: rgba(6, 9, 13, 0.7);
}
.modal.open { display: grid; }
.modal-content {
    width: min(400px, calc(100% - 32px));
    background: var(--sim-panel);
    border: 1px solid var(--sim-line);
    border-radius: var(--sim-radius);
}
.modal-header, .modal-body, .modal-footer { padding: 14px 18px; }
.modal-header {
    display: flex;
    justify-content: space-between;
    border-bottom: 1px solid var(--sim-line);
}
.modal-title { margin: 0; font-size: 16px; }
.modal-footer { display: flex; justify-content: flex-end; gap: 8px; }

/* Trade forms */
.trade-form { display: grid; gap: 8px; margin-top: 12px; max-width: 300px; }
.trade-form label { color: var(--sim-muted); font-size: 12px; }
.trade-form input, .trade-form select {
    padding: 7px 9px;
    border: 1px solid var(--sim-line);
    border-radius: 6px;
    background: var(--sim-page);
    color: var(--sim-ink);
    font: inherit;
}

/* Search news */
.news-list { margin: 0; padding: 0; list-style: none; }
.news-list li + li { border-top: 1px solid var(--sim-line); }
.news-list li { padding: 8px 0; }
.news-list a { color: var(--sim-accent); }
.news-list span { color: var(--sim-muted); }

@media (max-width: 640px) {
    body { padding: 16px 8px; }
    .grid { grid-template-columns: 1fr; }
    .card-value { font-size: 22px; }
}
";
