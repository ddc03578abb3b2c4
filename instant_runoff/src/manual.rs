/*!

This is the long-form manual for `instant_runoff` and `irvtab`.

## Counting rules

* A candidate wins as soon as it holds **strictly more** than half of the
  first choices of the ballots still in play. Exactly half is not enough.
* Otherwise the candidate with the fewest first choices is eliminated, and
  every ballot that ranked it moves its lower choices up by one rank.
* A ballot whose candidates have all been eliminated is exhausted: it is not
  counted anymore, and the majority is computed without it.
* When the remaining candidates all have the same number of first choices,
  the count stops and they are all declared winners.
* When several candidates share the fewest first choices, the tie break
  (see `tiebreakMode` below) decides which of them are eliminated. Candidates
  that are still tied after the tie break are eliminated in the same round.

The finishing order is computed by running the count again without the
candidates already placed: the winner(s) of that second count are in second
place, and so on until every candidate is placed.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, one ballot per row, choices in order
* `csv_likert` Comma Separated Values, one column per candidate
* `xlsx` Excel spreadsheet, for example the responses of an online form
* `json` A list of ballots in JSON

### `csv`

Each column (in order) is a choice. The name of the choice in the header is
not significant.

```text
id,choice 1,choice 2,choice 3,choice 4
id1,apple,banana,carrot,date
id2,banana,apple,,
```

Blank cells are skipped: the next filled cell takes the rank. A candidate
that appears a second time on the same row is ignored. Rows whose first
choice is blank are treated as a missing response and skipped.

### `csv_likert`

One column per candidate, named in the header. The cells hold the rank given
to the candidate, or nothing if the candidate was not ranked.

```text
id,apple,banana,carrot,date
id1,1,2,3,
id2,2,1,,
```

Giving the same rank to two candidates on one row is an error.

Some forms write labels such as `First`, `Second` instead of numbers. Pass
the labels in order with `--choices First,Second,Third` (or `choices` in the
configuration) to read them as ranks 1, 2 and 3.

### `xlsx`

The same layout as `csv`, read from the first worksheet, or from the
worksheet given with `excelWorksheetName` or `--excel-worksheet-name`.

### `json`

```text
[
  [{"candidate": "apple", "rank": 1}, {"candidate": "banana", "rank": 2}],
  [{"candidate": "banana", "rank": 1}]
]
```

## Configuration

`irvtab` runs with sensible defaults when given a single input file
(`--input`). A configuration file (`--config`) in JSON describes the contest,
the ballot files and the rules:

```text
{
  "outputSettings": {
    "contestName": "Favourite fruit",
    "outputPath": "summary.json"
  },
  "ballotSources": [
    {
      "provider": "csv",
      "filePath": "fruit.csv",
      "firstVoteColumnIndex": 2,
      "firstVoteRowIndex": 2
    }
  ],
  "rules": {
    "tiebreakMode": "deeperRanks",
    "maxRankMode": "recompute"
  }
}
```

File paths are relative to the configuration file. Column and row indexes
start at 1, and columns may also be given as a letter (`"B"`).

Rules:
 - `tiebreakMode`: `deeperRanks` (default) narrows a tie for the last place by
   looking at the second choices, then the third, and so on. `firstRankOnly`
   eliminates all the tied candidates together.
 - `maxRankMode`: how deep the tie break may look after some eliminations.
   `recompute` (default) uses the longest remaining ballot.
   `decrementPerElimination` starts every round from the longest ballot and
   removes one rank per candidate eliminated in the round.

## Output

The summary is a JSON document with the finishing order of the candidates
(`places`) and the tally of every round of the count (`results`), in the
format used by RCVis. It is printed, or written to `outputPath` / `--out`.

 */
