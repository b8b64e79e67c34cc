//! Page JavaScript
//!
//! Client-side behaviour shared by every page:
//! - Alert auto-dismissal after each alert's `data-dismiss-after` delay
//! - Modal open/close
//! - Chart drawing from `data-figure` containers
//! - Header-click sorting for sortable tables
//! - Buy/sell checks against `/api/validate-trade` before confirming
//! - Sell form limit and price following the chosen holding

pub const SCRIPT: &str = r#"
// ============================================================================
// Alerts
// ============================================================================
const DEFAULT_DISMISS_MS = 3000;

function scheduleDismiss(alert) {
    const delay = Number(alert.dataset.dismissAfter) || DEFAULT_DISMISS_MS;
    setTimeout(() => alert.remove(), delay);
}

function flashMessage(message, level = 'danger') {
    const alert = document.createElement('div');
    alert.className = `alert alert-${level} alert-dismissible fade show`;
    alert.setAttribute('role', 'alert');
    alert.textContent = message;

    const close = document.createElement('button');
    close.type = 'button';
    close.className = 'btn-close';
    close.dataset.dismiss = 'alert';
    alert.appendChild(close);

    const container = document.getElementById('alertMessage');
    alert.dataset.dismissAfter = container.dataset.dismissAfter || DEFAULT_DISMISS_MS;
    container.appendChild(alert);
    scheduleDismiss(alert);
}

// ============================================================================
// Modals
// ============================================================================
function openModal(id) {
    document.getElementById(id)?.classList.add('open');
}

function closeModal(modal) {
    modal.classList.remove('open');
}

document.addEventListener('click', (event) => {
    const dismiss = event.target.dataset?.dismiss;
    if (dismiss === 'alert') {
        event.target.closest('.alert')?.remove();
    } else if (dismiss === 'modal') {
        const modal = event.target.closest('.modal');
        if (modal) closeModal(modal);
    }

    const opens = event.target.dataset?.open;
    if (opens) openModal(opens);
});

// ============================================================================
// Charts
// ============================================================================
function drawCharts() {
    if (typeof Plotly === 'undefined') return;

    document.querySelectorAll('[data-figure]').forEach((container) => {
        const figure = JSON.parse(container.dataset.figure);
        Plotly.newPlot(container, figure.data, figure.layout, { responsive: true });
    });
}

// ============================================================================
// Sortable tables
// ============================================================================
function cellValue(row, index) {
    const text = row.children[index]?.textContent ?? '';
    const number = parseFloat(text.replace(/[$,%]/g, ''));
    return isNaN(number) ? text : number;
}

function sortTable(header) {
    const table = header.closest('table');
    const tbody = table.querySelector('tbody');
    const index = Array.from(header.parentNode.children).indexOf(header);
    const ascending = header.dataset.order !== 'asc';

    const rows = Array.from(tbody.querySelectorAll('tr'));
    rows.sort((a, b) => {
        const x = cellValue(a, index);
        const y = cellValue(b, index);
        const cmp = x < y ? -1 : x > y ? 1 : 0;
        return ascending ? cmp : -cmp;
    });

    rows.forEach((row) => tbody.appendChild(row));
    header.dataset.order = ascending ? 'asc' : 'desc';
}

document.addEventListener('click', (event) => {
    const header = event.target.closest?.('th[data-sortable]');
    if (header) sortTable(header);
});

// ============================================================================
// Trade forms
// ============================================================================
async function validateTrade(formId) {
    const form = document.getElementById(formId);
    const body = {
        action: form.dataset.action,
        shares: form.querySelector('#shares').value,
        max_shares: Number(form.dataset.maxShares),
        ticker: form.querySelector('#ticker').value,
        price: Number(form.querySelector('#price').value),
    };

    try {
        const res = await fetch('/api/validate-trade', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body),
        });
        const outcome = await res.json();

        if (!res.ok || outcome.error) {
            flashMessage(outcome.message || 'Could not check this trade', 'danger');
        } else if (outcome.accepted) {
            document.getElementById('confirmText').textContent = outcome.message;
            openModal('confirmPopup');
        } else {
            flashMessage(outcome.message, outcome.level);
        }
    } catch (e) {
        flashMessage('Error: ' + e.message, 'danger');
    }
}

document.addEventListener('click', (event) => {
    const formId = event.target.dataset?.validate;
    if (formId) validateTrade(formId);
});

function syncHolding(select) {
    const form = select.closest('form');
    const option = select.selectedOptions[0];
    if (!form || !option) return;

    form.dataset.maxShares = option.dataset.maxShares ?? '0';
    form.querySelector('#shares')?.setAttribute('max', form.dataset.maxShares);
    const price = form.querySelector('#price');
    if (price && option.dataset.price) price.value = option.dataset.price;
}

document.addEventListener('change', (event) => {
    if (event.target.matches?.('.trade-form select')) syncHolding(event.target);
});

// ============================================================================
// Initialization
// ============================================================================
document.addEventListener('DOMContentLoaded', () => {
    document.querySelectorAll('#alertMessage .alert').forEach(scheduleDismiss);
    document.querySelectorAll('.trade-form select').forEach((select) => {
        if (select.selectedOptions[0]?.dataset.maxShares) syncHolding(select);
    });
    drawCharts();
});
"#;
