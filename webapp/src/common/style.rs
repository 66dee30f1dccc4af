use constcat::concat;

// the theme is switched with <html data-theme="dark">, so every colour the
// page uses goes through one of these variables
pub const CSS_VARIABLES: &str = r#"
:root,
[data-theme="light"] {
  --primary: #3498db;
  --primary-dark: #2980b9;
  --background: #ffffff;
  --surface: #f8f9fa;
  --text-primary: #2c3e50;
  --text-secondary: #6c757d;
  --border: #dee2e6;
  --navbar-background: rgba(255, 255, 255, 0.95);
  --navbar-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
  --navbar-height: 64px;
}

[data-theme="dark"] {
  --primary: #5dade2;
  --primary-dark: #3498db;
  --background: #1a1a2e;
  --surface: #16213e;
  --text-primary: #eaeaea;
  --text-secondary: #a0a0b0;
  --border: #2c3e50;
  --navbar-background: rgba(26, 26, 46, 0.95);
  --navbar-shadow: 0 2px 10px rgba(0, 0, 0, 0.5);
}
"#;

pub const NAVBAR: &str = r#"
.navbar {
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  height: var(--navbar-height);
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0 24px;
  background-color: var(--navbar-background);
  z-index: 100;
  transition: box-shadow 0.3s ease, height 0.3s ease;
}

.navbar.scrolled {
  height: 56px;
  box-shadow: var(--navbar-shadow);
}

.nav-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--text-primary);
}

.nav-menu {
  display: flex;
  gap: 24px;
  list-style: none;
}

.nav-link {
  color: var(--text-secondary);
  text-decoration: none;
  padding: 4px 0;
  border-bottom: 2px solid transparent;
}

.nav-link:hover,
.nav-link.active {
  color: var(--primary);
  border-bottom-color: var(--primary);
}

.nav-controls {
  display: flex;
  align-items: center;
  gap: 12px;
}

.theme-toggle {
  background: none;
  border: 1px solid var(--border);
  border-radius: 50%;
  width: 36px;
  height: 36px;
  cursor: pointer;
  font-size: 1rem;
}

.hamburger {
  display: none;
  flex-direction: column;
  gap: 4px;
  background: none;
  border: none;
  cursor: pointer;
}

.hamburger .bar {
  width: 24px;
  height: 3px;
  background-color: var(--text-primary);
  transition: transform 0.3s ease, opacity 0.3s ease;
}

.hamburger.active .bar:nth-child(1) {
  transform: translateY(7px) rotate(45deg);
}

.hamburger.active .bar:nth-child(2) {
  opacity: 0;
}

.hamburger.active .bar:nth-child(3) {
  transform: translateY(-7px) rotate(-45deg);
}

@media (max-width: 768px) {
  .hamburger {
    display: flex;
  }

  .nav-menu {
    position: fixed;
    top: var(--navbar-height);
    left: -100%;
    width: 100%;
    flex-direction: column;
    align-items: center;
    padding: 24px 0;
    background-color: var(--navbar-background);
    transition: left 0.3s ease;
  }

  .nav-menu.active {
    left: 0;
  }
}
"#;

pub const SECTIONS: &str = r#"
.main-container {
  position: relative;
  height: 100vh;
  overflow-y: auto;
  scroll-snap-type: y proximity;
}

.section {
  min-height: 100vh;
  padding: calc(var(--navbar-height) + 32px) 24px 48px;
  scroll-snap-align: start;
}

.section:nth-child(even) {
  background-color: var(--surface);
}

.section h2 {
  margin-bottom: 24px;
  font-size: 2rem;
}

.projects-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
  gap: 24px;
}

.project-card {
  padding: 24px;
  border: 1px solid var(--border);
  border-radius: 8px;
  background-color: var(--background);
}
"#;

pub const CONTACT_FORM: &str = r#"
.contact-form {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 16px;
  max-width: 720px;
}

.contact-form .full-width {
  grid-column: 1 / -1;
}

.contact-form input,
.contact-form textarea {
  width: 100%;
  padding: 10px 12px;
  border: 2px solid var(--border);
  border-radius: 6px;
  background-color: var(--background);
  color: var(--text-primary);
  font: inherit;
}

.contact-form button {
  justify-self: start;
  padding: 10px 24px;
  border: none;
  border-radius: 6px;
  background-color: var(--primary);
  color: #ffffff;
  cursor: pointer;
}

.contact-form button:hover {
  background-color: var(--primary-dark);
}
"#;

// outlines only appear once someone has pressed tab
pub const FOCUS: &str = r#"
*:focus {
  outline: none;
}

body.keyboard-navigation *:focus {
  outline: 2px solid var(--primary);
  outline-offset: 2px;
}
"#;

pub const PORTFOLIO_STYLES: &str = concat!(
    r#"
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  color: var(--text-primary);
  background-color: var(--background);
  line-height: 1.6;
  transition: background-color 0.3s ease, color 0.3s ease;
}
"#,
    CSS_VARIABLES,
    NAVBAR,
    SECTIONS,
    CONTACT_FORM,
    FOCUS,
);
