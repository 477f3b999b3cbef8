//! Built-in sample document for trying the app without a file.

pub const SAMPLE_DOCUMENT: &str = "LOAN AND SECURITY AGREEMENT
This LOAN AND SECURITY AGREEMENT (this \u{201c}Agreement\u{201d}) is entered into as of October 24, 2023, by and between APEX TECHNOLOGIES INC., a Delaware corporation (\u{201c}Borrower\u{201d}), and LENDING PARTNERS LLC, a New York limited liability company (\u{201c}Lender\u{201d}).

1. LOAN TERMS.
1.1 Credit Extension. Subject to the terms and conditions of this Agreement, Lender agrees to lend to Borrower an amount not to exceed One Million Dollars ($1,000,000) (the \u{201c}Loan\u{201d}).
1.2 Interest Rate. The Loan shall bear interest on the outstanding principal amount thereof at a rate per annum equal to eight percent (8.00%).
1.3 Maturity Date. All outstanding principal and accrued interest shall be due and payable in full on October 24, 2025 (the \u{201c}Maturity Date\u{201d}).

2. SECURITY INTEREST.
Borrower hereby grants to Lender a continuing security interest in all of Borrower\u{2019}s right, title, and interest in and to the following property, whether now owned or hereafter acquired (the \u{201c}Collateral\u{201d}): all inventory, equipment, accounts, and intellectual property. Borrower authorizes Lender to file financing statements in all appropriate jurisdictions to perfect Lender\u{2019}s security interest.

3. COVENANTS.
Borrower shall not, without Lender\u{2019}s prior written consent: (a) undergo a Change in Control; (b) create or permit to exist any Lien on any of its property; or (c) pay any dividends or make any distributions on its capital stock.

4. EVENTS OF DEFAULT.
The occurrence of any of the following shall constitute an Event of Default: (a) Borrower fails to make any payment of principal or interest when due; (b) Borrower breaches any negative covenant in Section 3; or (c) Borrower becomes insolvent or files for bankruptcy protection.";
