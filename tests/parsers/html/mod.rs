mod apply_replacements;
