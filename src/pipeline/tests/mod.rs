mod fake_browser;
